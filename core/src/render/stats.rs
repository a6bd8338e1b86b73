//! Rendering statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Collects and accumulates frame statistics.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent rendering.
    pub time: Duration,
    /// Number of frames rendered.
    pub frames: u64,
    /// Number of draw calls issued.
    pub calls: u64,
    /// Number of triangles submitted.
    pub tris: u64,
    /// Number of vertices submitted.
    pub verts: u64,
    /// Number of times the mesh was generated.
    pub regens: u32,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Stats` instance that records the time of its creation.
    ///
    /// Call [`finish`][Self::finish] to write the elapsed time to `self.time`.
    /// Equivalent to [`Stats::new`] if the `std` feature is not enabled.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer and records the elapsed time to `self.time`.
    ///
    /// No-op if the timer was not running, or if the `std` feature is not
    /// enabled.
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map(|st| st.elapsed()).unwrap_or(self.time),
            ..self
        }
    }

    /// Returns the average number of draw calls per frame.
    pub fn calls_per_frame(&self) -> f32 {
        self.calls as f32 / self.frames.max(1) as f32
    }

    /// Returns the average frame time.
    pub fn frame_time(&self) -> Duration {
        self.time.div_f64(self.frames.max(1) as f64)
    }
}

impl Display for Stats {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(12);
        let frames = self.frames.max(1);
        let per_frame = |n: u64| human_num(n / frames);
        writeln!(f, " STATS  {:>w$} │ {:>w$}", "TOTAL", "PER FRAME")?;
        writeln!(f, "────────{e:─>w$}─┼─{e:─>w$}─", e = "")?;
        writeln!(f, " time   {:>w$} │ {:>w$}",
            human_time(self.time), human_time(self.frame_time()))?;
        writeln!(f, " frames {:>w$} │", self.frames)?;
        writeln!(f, " calls  {:>w$} │ {:>w$.1}", self.calls, self.calls_per_frame())?;
        writeln!(f, " tris   {:>w$} │ {:>w$}", human_num(self.tris), per_frame(self.tris))?;
        writeln!(f, " verts  {:>w$} │ {:>w$}", human_num(self.verts), per_frame(self.verts))?;
        writeln!(f, " regens {:>w$} │", self.regens)
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.frames += other.frames;
        self.calls += other.calls;
        self.tris += other.tris;
        self.verts += other.verts;
        self.regens += other.regens;
    }
}

fn human_num(n: u64) -> String {
    if n < 10_000 {
        format!("{n}")
    } else if n < 1_000_000 {
        format!("{:.1}k", n as f32 / 1e3)
    } else {
        format!("{:.1}M", n as f32 / 1e6)
    }
}

fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1e-3 {
        format!("{:.1}μs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.1}ms", secs * 1e3)
    } else {
        format!("{secs:.1}s")
    }
}
