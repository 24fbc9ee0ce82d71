use std::cell::RefCell;
use std::rc::Rc;

use hero_slides::constants::RENDER_WIDTH;
use hero_slides::deck::SlideDeck;
use hero_slides::input::{InputEvent, InputOutcome, Key};
use hero_slides::slide::Slide;
use hero_slides::source::{BuiltInSource, StaticSource, SuppliedDeck};
use hero_slides::{Direction, EngineOptions, HeroEngine, NavigationState};

// Longer than any transition
const SETTLE: f32 = 5.0;

fn abc() -> HeroEngine {
    let slides = ["A", "B", "C"]
        .iter()
        .map(|id| Slide::new(*id, format!("Slide {id}"), "subtitle"))
        .collect::<Vec<_>>();
    HeroEngine::mount(&StaticSource(SuppliedDeck::from(slides)), EngineOptions::default())
}

fn settle(engine: &mut HeroEngine) {
    engine.advance(SETTLE);
    assert!(!engine.state().busy);
}

#[test]
fn five_awaited_nexts_on_the_default_deck_come_home() {
    let mut engine = HeroEngine::mount(&BuiltInSource, EngineOptions::default());
    assert_eq!(engine.deck().len(), 5);

    for expected in [1, 2, 3, 4, 0] {
        assert!(engine.navigate(Direction::Next));
        settle(&mut engine);
        assert_eq!(engine.state().current_index, expected);
    }
}

#[test]
fn wheel_up_on_the_first_slide_scrolls_the_page() {
    let mut engine = HeroEngine::mount(&BuiltInSource, EngineOptions::default());
    let outcome = engine.handle_input(InputEvent::Wheel { delta_y: -100.0 });
    assert!(!outcome.is_consumed());
    assert!(!engine.is_transitioning());
}

#[test]
fn wheel_down_past_the_last_slide_scrolls_the_page() {
    let mut engine = abc();
    engine.navigate(Direction::Previous);
    settle(&mut engine);
    assert_eq!(engine.state().current_index, 2);

    let outcome = engine.handle_input(InputEvent::Wheel { delta_y: 100.0 });
    assert_eq!(outcome, InputOutcome::PassThrough);
    assert_eq!(engine.state().current_index, 2);
}

#[test]
fn short_drag_is_not_a_swipe() {
    let mut engine = abc();
    engine.handle_input(InputEvent::TouchStart { y: 400.0 });
    let outcome = engine.handle_input(InputEvent::TouchEnd { y: 397.0 });
    assert_eq!(outcome, InputOutcome::Ignored);
    assert_eq!(engine.state(), NavigationState::default());
}

#[test]
fn swipe_up_advances_and_swipe_down_goes_back() {
    let mut engine = abc();
    engine.handle_input(InputEvent::TouchStart { y: 500.0 });
    engine.handle_input(InputEvent::TouchEnd { y: 300.0 });
    settle(&mut engine);
    assert_eq!(engine.state().current_index, 1);

    engine.handle_input(InputEvent::TouchStart { y: 300.0 });
    engine.handle_input(InputEvent::TouchEnd { y: 500.0 });
    settle(&mut engine);
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn arrow_right_walks_the_deck_and_wraps() {
    let mut engine = abc();
    let mut seen = vec![engine.state().current_index];
    for _ in 0..3 {
        let outcome = engine.handle_input(InputEvent::Key(Key::ArrowRight));
        assert_eq!(outcome, InputOutcome::Consumed { accepted: true });
        settle(&mut engine);
        seen.push(engine.state().current_index);
    }
    assert_eq!(seen, [0, 1, 2, 0]);
}

#[test]
fn click_on_the_left_tenth_goes_back() {
    let mut engine = abc();
    engine.navigate(Direction::Next);
    settle(&mut engine);
    assert_eq!(engine.state().current_index, 1);

    let x = RENDER_WIDTH as f32 * 0.1;
    engine.handle_input(InputEvent::Click { x, over_control: false });
    settle(&mut engine);
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn any_number_of_steps_lands_on_m_mod_n() {
    for steps in [0usize, 1, 4, 7, 11] {
        let mut engine = abc();
        for _ in 0..steps {
            engine.navigate(Direction::Next);
            settle(&mut engine);
        }
        assert_eq!(engine.state().current_index, steps % 3, "after {steps} steps");
    }
}

#[test]
fn requests_during_a_transition_are_dropped() {
    let mut engine = abc();
    assert!(engine.navigate(Direction::Next));
    engine.advance(0.4);

    assert!(!engine.navigate(Direction::Next));
    assert_eq!(engine.handle_input(InputEvent::Key(Key::ArrowDown)), InputOutcome::Consumed { accepted: false });

    settle(&mut engine);
    assert_eq!(engine.state().current_index, 1);
}

#[test]
fn listeners_see_busy_then_commit() {
    let mut engine = abc();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe(move |state| sink.borrow_mut().push(state));

    engine.navigate(Direction::Previous);
    settle(&mut engine);

    assert_eq!(
        *seen.borrow(),
        [
            NavigationState { current_index: 0, busy: true },
            NavigationState { current_index: 2, busy: false },
        ]
    );
}

#[test]
fn unmounting_mid_transition_commits_nothing() {
    let mut engine = abc();
    engine.navigate(Direction::Next);
    engine.advance(0.6);
    engine.unmount();

    engine.advance(SETTLE);
    assert_eq!(engine.state().current_index, 0);
    assert!(!engine.is_mounted());
    assert!(!engine.navigate(Direction::Next));
}

#[test]
fn too_small_a_deck_falls_back_to_the_default() {
    let slides = vec![Slide::new("only", "Only", ""), Slide::new("two", "Two", "")];
    let engine = HeroEngine::mount(&StaticSource(slides.into()), EngineOptions::default());
    assert_eq!(engine.deck(), &SlideDeck::default_deck());
}

#[test]
fn repeated_ids_still_show_each_slide() {
    let slides = ["a", "a#2", "a"]
        .iter()
        .map(|id| Slide::new(*id, *id, ""))
        .collect::<Vec<_>>();
    let mut engine = HeroEngine::mount(&StaticSource(slides.into()), EngineOptions::default());

    for expected in [1, 2, 0] {
        engine.navigate(Direction::Next);
        settle(&mut engine);
        let shown: Vec<_> = engine.registry().draw_order().iter().map(|view| view.index).collect();
        assert_eq!(shown, [expected]);
    }
}

#[test]
fn keys_and_swipes_leave_a_scrolled_away_hero_alone() {
    let mut engine = abc();
    engine.navigate(Direction::Previous);
    settle(&mut engine);

    // On the last slide the wheel scrolls the page past the hero
    let height = engine.viewport().height();
    assert_eq!(engine.handle_input(InputEvent::Wheel { delta_y: height }), InputOutcome::PassThrough);
    assert!(!engine.hero_in_view());

    assert_eq!(engine.handle_input(InputEvent::Key(Key::ArrowRight)), InputOutcome::PassThrough);
    engine.handle_input(InputEvent::TouchStart { y: 500.0 });
    assert_eq!(engine.handle_input(InputEvent::TouchEnd { y: 100.0 }), InputOutcome::PassThrough);
    assert!(!engine.is_transitioning());
    assert_eq!(engine.state().current_index, 2);
}
