//! Once-per-session splash animation.

use leptos::prelude::*;

use crate::{dom, layout::Logo};

/// Stage of the intro animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntroPhase {
    Start,
    LogoVisible,
    TextVisible,
    FadingOut,
}

impl IntroPhase {
    /// Phase changes, in milliseconds from mount.
    pub const SCHEDULE: [(i32, IntroPhase); 3] = [
        (100, IntroPhase::LogoVisible),
        (600, IntroPhase::TextVisible),
        (2600, IntroPhase::FadingOut),
    ];

    /// The animation ends, and the site shows, at this offset.
    pub const END_MS: i32 = 3100;

    pub fn logo_shown(self) -> bool {
        self >= IntroPhase::LogoVisible
    }

    pub fn text_shown(self) -> bool {
        self >= IntroPhase::TextVisible
    }

    /// Phase in effect `elapsed` milliseconds after mount.
    pub fn at(elapsed: i32) -> IntroPhase {
        Self::SCHEDULE
            .iter()
            .rev()
            .find(|(ms, _)| elapsed >= *ms)
            .map_or(IntroPhase::Start, |(_, phase)| *phase)
    }
}

/// Full-screen logo animation; calls `on_end` once it has faded out.
#[component]
pub fn IntroAnimation(on_end: Callback<()>) -> impl IntoView {
    let phase = RwSignal::new(IntroPhase::Start);

    let mut timers: Vec<i32> = IntroPhase::SCHEDULE
        .iter()
        .filter_map(|&(ms, next)| dom::set_timeout(ms, move || phase.set(next)))
        .collect();
    timers.extend(dom::set_timeout(IntroPhase::END_MS, move || on_end.run(())));
    on_cleanup(move || timers.into_iter().for_each(dom::clear_timeout));

    view! {
      <div class="intro" class:fading=move || phase.get() == IntroPhase::FadingOut>
        <div class="intro-logo" class:shown=move || phase.get().logo_shown()>
          <Logo class="logo-large" />
        </div>
        <p class="intro-text" class:shown=move || phase.get().text_shown()>
          "votre partenaire de succès"
        </p>
      </div>
    }
}
