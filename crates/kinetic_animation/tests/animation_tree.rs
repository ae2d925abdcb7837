//! Integration tests for composed animation trees
//!
//! These tests verify that:
//! - Nested sequential and parallel groups honor their duration laws
//! - Late polls catch up through every elapsed window
//! - Parallel children are pruned independently
//! - Every leaf observes the same instant within one poll

use kinetic_animation::{
    Animation, AnimationGroup, Interpolator, ManualClock, ParallelAnimationGroup, Player,
    PropertyAnimation, SequentialAnimationGroup, Time,
};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

type Shared = Rc<Cell<f64>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn shared(value: f64) -> Shared {
    Rc::new(Cell::new(value))
}

fn leaf(target: &Shared, from: f64, to: f64, duration: Time) -> PropertyAnimation<f64, Shared> {
    PropertyAnimation::from_to(Rc::clone(target), from, to, duration)
}

#[test]
fn test_end_to_end_linear_scalar() {
    let mut value = 0.0_f64;
    let mut anim = PropertyAnimation::new(&mut value, 0.0, 10.0, 1000, Interpolator::Linear);
    anim.start(0);
    assert!(anim.poll(500));
    assert!(!anim.poll(1000));
    drop(anim);
    assert_eq!(value, 10.0);

    let target = shared(0.0);
    let mut anim = leaf(&target, 0.0, 10.0, 1000);
    anim.start(0);
    assert!(anim.poll(500));
    assert_eq!(target.get(), 5.0);
}

#[test]
fn test_sequential_catch_up_after_skipped_polls() {
    init_tracing();
    let a = shared(0.0);
    let b = shared(0.0);
    let mut group = SequentialAnimationGroup::new()
        .with(leaf(&a, 0.0, 1.0, 100))
        .with(leaf(&b, 0.0, 2.0, 50));
    group.start(0);

    assert!(!group.poll(200));
    assert!(group.is_empty());
    assert_eq!((a.get(), b.get()), (1.0, 2.0));
}

#[test]
fn test_parallel_pruning_past_nominal_window() {
    init_tracing();
    let a = shared(0.0);
    let b = shared(0.0);
    let mut group = ParallelAnimationGroup::new()
        .with(leaf(&a, 0.0, 1.0, 50))
        .with(leaf(&b, 0.0, 1.0, 200));
    group.start(0);

    assert!(group.poll(60));
    assert_eq!(group.len(), 1);
    assert!(!group.poll(200));
    assert!(group.is_empty());
}

#[test]
fn test_nested_duration_laws() {
    let x = shared(0.0);
    let inner_parallel = ParallelAnimationGroup::new()
        .with(leaf(&x, 0.0, 1.0, 30))
        .with(leaf(&x, 0.0, 1.0, 70));
    let inner_sequential = SequentialAnimationGroup::new()
        .with(leaf(&x, 0.0, 1.0, 10))
        .with(leaf(&x, 0.0, 1.0, 15));

    let mut root = SequentialAnimationGroup::new();
    root.push(inner_parallel);
    root.push(inner_sequential);
    root.push(leaf(&x, 0.0, 1.0, 5));
    assert_eq!(root.duration(), 70 + 25 + 5);

    root.start(1_000);
    assert_eq!(root.child_start_times(), vec![1_000, 1_070, 1_095]);

    let mut outer = ParallelAnimationGroup::new().with(root).with(leaf(&x, 0.0, 1.0, 40));
    assert_eq!(outer.duration(), 100);
    outer.stop();
}

#[test]
fn test_nested_tree_drains_in_order() {
    init_tracing();
    let a = shared(-1.0);
    let b = shared(-1.0);
    let c = shared(-1.0);

    let mut tree = SequentialAnimationGroup::new()
        .with(
            ParallelAnimationGroup::new()
                .with(leaf(&a, 0.0, 1.0, 100))
                .with(leaf(&b, 0.0, 1.0, 50)),
        )
        .with(leaf(&c, 0.0, 1.0, 100));
    tree.start(0);

    // c is not polled until the parallel stage drains
    assert!(tree.poll(25));
    assert_eq!((a.get(), b.get(), c.get()), (0.25, 0.5, -1.0));

    assert!(tree.poll(75));
    assert_eq!((a.get(), b.get(), c.get()), (0.75, 1.0, -1.0));

    assert!(tree.poll(150));
    assert_eq!((a.get(), b.get(), c.get()), (1.0, 1.0, 0.5));

    assert!(!tree.poll(200));
    assert_eq!(c.get(), 1.0);
    assert!(tree.is_empty());
}

#[test]
fn test_leaves_observe_one_instant_per_poll() {
    let values: Vec<Shared> = (0..4).map(|_| shared(0.0)).collect();
    let mut group = ParallelAnimationGroup::new();
    for value in &values {
        group.push(leaf(value, 0.0, 100.0, 400));
    }
    group.start(0);
    assert!(group.poll(100));
    for value in &values {
        assert_eq!(value.get(), 25.0);
    }
}

#[test]
fn test_sequential_pre_roll_of_later_children() {
    // Two leaves bound to one value: the later one only writes once reached
    let x = shared(0.0);
    let mut group = SequentialAnimationGroup::new()
        .with(leaf(&x, 0.0, 10.0, 100))
        .with(leaf(&x, 10.0, 0.0, 100));
    group.start(0);

    assert!(group.poll(50));
    assert_eq!(x.get(), 5.0);
    assert!(group.poll(100));
    assert_eq!(x.get(), 10.0);
    assert!(group.poll(150));
    assert_eq!(x.get(), 5.0);
    assert!(!group.poll(250));
    assert_eq!(x.get(), 0.0);
}

#[test]
fn test_started_in_future() {
    let x = shared(3.0);
    let mut group = ParallelAnimationGroup::new().with(leaf(&x, 1.0, 2.0, 10));
    group.start(500);
    assert!(group.poll(0));
    assert_eq!(x.get(), 1.0);
    assert!(!group.started(0));
    assert_eq!(group.elapsed(0), 0);
    assert_eq!(group.remaining(0), 10);
}

#[test]
fn test_player_with_irregular_ticks() {
    init_tracing();
    let clock = ManualClock::new(10_000);
    let x = shared(0.0);
    let y = shared(0.0);
    let tree = SequentialAnimationGroup::new()
        .with(leaf(&x, 0.0, 1.0, 100).with_interpolator(Interpolator::Sine))
        .with(leaf(&y, 0.0, 1.0, 100).with_interpolator(Interpolator::back().inverse()));
    let mut player = Player::new(tree, &clock);
    player.start();

    let mut seen = Vec::new();
    for step in [7, 93, 1, 48, 300] {
        assert!(player.poll() || step == 300);
        clock.advance(step);
        seen.push(player.elapsed());
    }
    assert_eq!(seen, vec![7, 100, 101, 149, 200]);
    assert!(!player.poll());
    assert_eq!((x.get(), y.get()), (1.0, 1.0));
}

#[test]
fn test_stop_cascades_through_nesting() {
    let a = shared(0.0);
    let b = shared(0.0);
    let c = shared(0.0);
    let mut tree = ParallelAnimationGroup::new()
        .with(
            SequentialAnimationGroup::new()
                .with(leaf(&a, 0.0, 1.0, 100))
                .with(leaf(&b, 0.0, 2.0, 100)),
        )
        .with(leaf(&c, 0.0, 3.0, 1_000));
    tree.start(0);
    assert!(tree.poll(10));

    tree.stop();
    assert_eq!((a.get(), b.get(), c.get()), (1.0, 2.0, 3.0));
    assert!(tree.is_empty());
    assert_eq!(Rc::strong_count(&a), 1);
    assert_eq!(Rc::strong_count(&c), 1);
}
