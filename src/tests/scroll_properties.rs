//! Property-based tests for scrolling through a mounted document.
//!
//! Random key and clock sequences are driven through `AppState`; the
//! properties are checked on the observable state after every step.

use crate::engine::CounterPhase;
use crate::engine::{RampConfig, RevealTiming};
use crate::model::{CaseStudy, KeyAction};
use crate::state::{handle_scroll_action, AppSettings, AppState};
use crate::test_harness::{add_stat, mounted_state, mounted_state_with, stacked_document, TEST_VIEWPORT};
use crate::view::{document_lines, ColorConfig, DeckStyles};
use crate::view_state::ScrollPosition;
use proptest::prelude::*;
use std::time::Duration;

// ===== Arbitrary Strategies =====

/// One step of user activity: a key press or some elapsed time.
#[derive(Debug, Clone, Copy)]
enum Step {
    Key(KeyAction),
    Wait(u64),
}

fn arb_scroll_action() -> impl Strategy<Value = KeyAction> {
    prop_oneof![
        Just(KeyAction::ScrollUp),
        Just(KeyAction::ScrollDown),
        Just(KeyAction::PageUp),
        Just(KeyAction::PageDown),
        Just(KeyAction::ScrollToTop),
        Just(KeyAction::ScrollToBottom),
        Just(KeyAction::NextSection),
        Just(KeyAction::PrevSection),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_scroll_action().prop_map(Step::Key),
        1 => (1u64..400).prop_map(Step::Wait),
    ]
}

/// Documents of 1-8 sections with 0-12 body lines and up to 3 statistics.
fn arb_document() -> impl Strategy<Value = CaseStudy> {
    (1usize..=8, 0usize..=12)
        .prop_flat_map(|(sections, body)| {
            let stats = prop::collection::vec((0..sections, 0.0f64..500.0), 0..=3);
            (Just(sections), Just(body), stats)
        })
        .prop_map(|(sections, body, stats)| {
            let mut doc = stacked_document(sections, body);
            for (section, target) in stats {
                add_stat(&mut doc, section, target, "%");
            }
            doc
        })
}

fn apply(state: &mut AppState, step: Step) {
    match step {
        Step::Key(action) => {
            handle_scroll_action(state, action);
        }
        Step::Wait(ms) => {
            state.advance(Duration::from_millis(ms));
        }
    }
}

fn max_offset(state: &AppState) -> usize {
    state
        .layout()
        .total_height()
        .saturating_sub(usize::from(state.viewport().height))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The resolved offset never leaves `[0, max_offset]`.
    #[test]
    fn offset_stays_in_bounds(
        doc in arb_document(),
        steps in prop::collection::vec(arb_step(), 0..40),
    ) {
        let mut state = mounted_state(doc);
        for step in steps {
            apply(&mut state, step);
            prop_assert!(state.scroll_offset() <= max_offset(&state));
        }
    }

    /// Revealed sections stay revealed and counters never count down.
    #[test]
    fn reveals_and_counters_only_move_forward(
        doc in arb_document(),
        steps in prop::collection::vec(arb_step(), 0..40),
    ) {
        let mut state = mounted_state(doc);
        let mut revealed: Vec<usize> = state.tracker().revealed().map(|s| s.get()).collect();
        let mut values: Vec<f64> = state.counters().iter().map(|c| c.value()).collect();

        for step in steps {
            apply(&mut state, step);

            let now: Vec<usize> = state.tracker().revealed().map(|s| s.get()).collect();
            for index in &revealed {
                prop_assert!(now.contains(index));
            }
            revealed = now;

            for (counter, before) in state.counters().iter().zip(&values) {
                prop_assert!(counter.value() >= *before);
                prop_assert!(counter.value() <= counter.target());
            }
            values = state.counters().iter().map(|c| c.value()).collect();
        }
    }

    /// Any started counter is done 1500ms later, wherever the viewport went.
    #[test]
    fn started_counters_always_finish(
        doc in arb_document(),
        steps in prop::collection::vec(arb_step(), 0..40),
    ) {
        let mut state = mounted_state(doc);
        for step in steps {
            apply(&mut state, step);
        }
        state.advance(Duration::from_millis(1500));

        for counter in state.counters() {
            if counter.has_started() {
                prop_assert_eq!(counter.phase(), CounterPhase::Done);
                prop_assert_eq!(counter.value(), counter.target());
            } else {
                prop_assert_eq!(counter.value(), 0.0);
            }
        }
        prop_assert_eq!(state.scheduler().active_timers(), 0);
    }

    /// Unmounting at any point releases every region and timer.
    #[test]
    fn unmount_releases_everything(
        doc in arb_document(),
        steps in prop::collection::vec(arb_step(), 0..20),
    ) {
        let mut state = mounted_state(doc);
        for step in steps {
            apply(&mut state, step);
        }
        state.unmount();

        prop_assert_eq!(state.observer().observed_count(), 0);
        prop_assert_eq!(state.scheduler().active_timers(), 0);
        for counter in state.counters() {
            prop_assert_ne!(counter.phase(), CounterPhase::Animating);
        }
    }

    /// Once everything is revealed and settled, scrolling down one line
    /// shifts the rendered rows up by exactly one.
    #[test]
    fn scrolling_one_line_shifts_rendering_by_one(
        sections in 2usize..=6,
        body in 1usize..=10,
        start in 0usize..60,
    ) {
        let settings = AppSettings {
            ramp: RampConfig::instant(),
            timing: RevealTiming::instant(),
            ..AppSettings::default()
        };
        let mut state = mounted_state_with(stacked_document(sections, body), settings, TEST_VIEWPORT);
        let max = max_offset(&state);
        prop_assume!(max > 0);

        // Visit every line so every section is revealed
        for line in 0..=max {
            state.scroll_to(ScrollPosition::at_line(line));
        }
        prop_assert!(state.tracker().all_revealed());

        let styles = DeckStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let height = usize::from(TEST_VIEWPORT.height);
        let start = start % max;

        state.scroll_to(ScrollPosition::at_line(start));
        let before: Vec<String> = document_lines(&state, height, &styles)
            .iter()
            .map(|l| l.to_string())
            .collect();
        handle_scroll_action(&mut state, KeyAction::ScrollDown);
        let after: Vec<String> = document_lines(&state, height, &styles)
            .iter()
            .map(|l| l.to_string())
            .collect();

        prop_assert_eq!(&before[1..], &after[..height - 1]);
    }
}
