use vizij_actions_core::{
    block::Block,
    composite::{group, repeat, sequence, Group, Repeat, RepeatCount, Sequence},
    config::Config,
    error::{ActionError, Result},
    leaf::{colorize, fade_in, fade_out, hide, move_by, move_to, remove, rotate_by, scale_by, wait},
    runnable::{Runnable, ToAction},
    timeline::Timeline,
    Action, Effect, TimingCurve,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// A mixed bag of finite leaves used by the list-level laws.
fn sample_leaves() -> Result<Vec<Runnable>> {
    Ok(vec![
        fade_in(0.7)?,
        move_by((10.0, -4.0), 1.25)?,
        wait(0.5)?,
        hide(),
        rotate_by(std::f32::consts::FRAC_PI_2, 0.3)?,
        colorize([1.0, 0.0, 0.0, 1.0], 0.5, 2.0)?,
        remove(),
    ])
}

fn prefixes(items: &[Runnable]) -> impl Iterator<Item = &[Runnable]> {
    (0..=items.len()).map(move |n| &items[..n])
}

#[test]
fn sequence_duration_is_the_sum_of_children() -> Result<()> {
    let leaves = sample_leaves()?;
    for list in prefixes(&leaves) {
        let expected: f32 = list.iter().map(|r| r.to_action().duration()).sum();
        let seq = Sequence::from_actions(list.iter().map(ToAction::to_action).collect());
        approx(seq.to_action().duration(), expected, 1e-5);
    }
    Ok(())
}

#[test]
fn sequence_runs_children_in_order_one_after_another() -> Result<()> {
    let leaves = sample_leaves()?;
    let cfg = Config::default();
    let seq = Sequence::from_actions(leaves.iter().map(ToAction::to_action).collect());
    let tl = Timeline::lower(&seq.to_action(), &cfg);

    // same effects, same order, each starting where the previous one ended
    let mut t = 0.0f32;
    assert_eq!(tl.effects().len(), leaves.len());
    for (scheduled, leaf) in tl.effects().iter().zip(&leaves) {
        let solo = leaf.to_action();
        assert_eq!(&scheduled.effect, solo.effect());
        approx(scheduled.start, t, 1e-5);
        approx(scheduled.duration, solo.duration(), 1e-5);
        t += solo.duration();
    }
    approx(tl.total_duration(), t, 1e-5);
    Ok(())
}

#[test]
fn group_duration_is_the_max_of_children() -> Result<()> {
    let leaves = sample_leaves()?;
    for list in prefixes(&leaves) {
        let expected = list
            .iter()
            .map(|r| r.to_action().duration())
            .fold(0.0f32, f32::max);
        let grp = Group::from_actions(list.iter().map(ToAction::to_action).collect());
        approx(grp.to_action().duration(), expected, 1e-6);
    }
    approx(Group::default().to_action().duration(), 0.0, 0.0);
    Ok(())
}

#[test]
fn repeat_matches_an_unrolled_sequence() -> Result<()> {
    let a = move_by((1.0, 2.0), 0.4)?;
    let cfg = Config::default();
    for n in 0..6u32 {
        let rep = Repeat::times(n, vec![a.to_action()]).to_action();
        let unrolled = Sequence::from_actions(vec![a.to_action(); n as usize]).to_action();
        approx(rep.duration(), unrolled.duration(), 1e-5);

        let rt = Timeline::lower(&rep, &cfg);
        let ut = Timeline::lower(&unrolled, &cfg);
        assert_eq!(rt.effects().len(), ut.effects().len());
        for (x, y) in rt.effects().iter().zip(ut.effects()) {
            assert_eq!(x.effect, y.effect);
            approx(x.start, y.start, 1e-5);
        }
    }

    let zero = Repeat::times(0, vec![a.to_action()]).to_action();
    approx(zero.duration(), 0.0, 0.0);
    assert!(Timeline::lower(&zero, &cfg).effects().is_empty());
    Ok(())
}

#[test]
fn repeat_with_several_children_repeats_them_as_a_sequence() -> Result<()> {
    let rep = Repeat::times(2, vec![fade_out(1.0)?.to_action(), fade_in(1.0)?.to_action()]);
    match rep.to_action().effect() {
        Effect::Repeat { count, action } => {
            assert_eq!(*count, RepeatCount::Times(2));
            assert!(matches!(action.effect(), Effect::Sequence { actions } if actions.len() == 2));
        }
        other => panic!("expected repeat, got {other:?}"),
    }
    approx(rep.to_action().duration(), 4.0, 1e-6);
    Ok(())
}

#[test]
fn reversed_move_is_the_negated_move_with_mirrored_timing() -> Result<()> {
    for (dx, dy, d) in [(3.0, 4.0, 1.0), (-2.5, 0.0, 0.25), (0.0, 0.0, 0.0)] {
        let fwd = move_by((dx, dy), d)?.with_timing_curve(TimingCurve::EaseIn);
        let expected = move_by((-dx, -dy), d)?.with_timing_curve(TimingCurve::EaseOut);
        assert_eq!(fwd.reversed()?, expected);
    }
    Ok(())
}

#[test]
fn operator_then_equals_declarative_sequence() -> Result<()> {
    let pairs: Vec<(Runnable, Runnable)> = vec![
        (fade_in(1.0)?, wait(1.0)?),
        (move_by((1.0, 1.0), 2.0)?, remove()),
        (
            Group::from_actions(vec![scale_by(2.0, 1.0)?.to_action()]).into(),
            Repeat::times(3, vec![rotate_by(1.0, 0.1)?.to_action()]).into(),
        ),
    ];
    for (a, b) in pairs {
        let via_op = (a.clone() + b.clone()).to_action();
        let via_block = sequence(|blk| Ok::<_, ActionError>(blk.add(a.clone()).add(b.clone())))?
            .to_action();
        assert_eq!(via_op, via_block);
        assert_eq!(a.then(&b).to_action(), via_block);

        let par_op = (a.clone() & b.clone()).to_action();
        let par_block = group(|blk| Ok::<_, ActionError>(blk.add(a.clone()).add(b.clone())))?
            .to_action();
        assert_eq!(par_op, par_block);
    }
    Ok(())
}

#[test]
fn repeat_operator_equals_declarative_repeat() -> Result<()> {
    let a = fade_in(0.5)?;
    let via_block = repeat(RepeatCount::Times(3), |b| Ok::<_, ActionError>(b.add(a.clone())))?;
    assert_eq!((a.clone() * 3).to_action(), via_block.to_action());
    assert_eq!((3 * a).to_action(), via_block.to_action());
    Ok(())
}

#[test]
fn dead_conditionals_and_empty_loops_vanish() -> Result<()> {
    let block = Block::new()
        .add(fade_in(1.0)?)
        .add_if(false, |b| Ok::<_, ActionError>(b.add(wait(1.0)?)))?
        .add_each(std::iter::empty::<f32>(), |b, _| {
            Ok::<_, ActionError>(b.add(hide()))
        })?
        .add(remove());
    assert_eq!(block.runnables(), &[fade_in(1.0)?, remove()]);

    let plain = Block::new().add(fade_in(1.0)?).add(remove());
    assert_eq!(
        Sequence::from_block(block).to_action(),
        Sequence::from_block(plain).to_action()
    );
    Ok(())
}

#[test]
fn composites_snapshot_children_at_construction() -> Result<()> {
    let mut child = fade_in(1.0)?;
    let seq = Sequence::from_block(Block::new().add(child.clone()).add(wait(1.0)?));
    let before = seq.to_action();

    child = fade_out(5.0)?;
    assert_eq!(child.to_action().duration(), 5.0);
    assert_eq!(seq.to_action(), before);
    approx(seq.to_action().duration(), 2.0, 1e-6);
    Ok(())
}

#[test]
fn shared_children_are_unaffected_by_modifiers_elsewhere() -> Result<()> {
    let shared = move_by((5.0, 0.0), 1.0)?.to_action();
    let seq = Sequence::from_actions(vec![shared.clone(), shared.clone()]);
    let fast = shared.with_speed(4.0)?;
    let grp = Group::from_actions(vec![fast, shared.clone()]);

    approx(seq.to_action().duration(), 2.0, 1e-6);
    approx(grp.to_action().duration(), 1.0, 1e-6);
    assert_eq!(shared.speed(), 1.0);
    Ok(())
}

#[test]
fn entrance_then_exit_takes_two_point_seven_seconds() -> Result<()> {
    let life = sequence(|b| {
        let entrance = group(|g| {
            Ok::<_, ActionError>(
                g.add(fade_in(0.7)?)
                    .add(scale_by(1.5, 0.7)?)
                    .add(move_to((0.0, 30.0), 0.7)?),
            )
        })?;
        Ok::<_, ActionError>(
            b.add(entrance)
                .add(wait(1.0)?)
                .add(fade_out(1.0)?)
                .add(remove()),
        )
    })?
    .to_action();

    approx(life.duration(), 2.7, 1e-5);

    let tl = Timeline::lower(&life, &Config::default());
    assert_eq!(
        tl.kinds(),
        vec!["fade", "scale", "move", "wait", "fade", "remove"]
    );
    // entrance effects run in parallel, then wait, fade out, detach
    let starts: Vec<f32> = tl.effects().iter().map(|e| e.start).collect();
    for (got, want) in starts.iter().zip([0.0, 0.0, 0.0, 0.7, 1.7, 2.7]) {
        approx(*got, want, 1e-5);
    }
    Ok(())
}

#[test]
fn nested_reversal_of_a_whole_composite() -> Result<()> {
    let out_and_back: Action = (move_by((10.0, 0.0), 1.0)? + fade_out(0.5)?).to_action();
    let back = out_and_back.reversed()?;
    let expected = Action::sequence(vec![
        fade_in(0.5)?.to_action(),
        move_by((-10.0, 0.0), 1.0)?.to_action(),
    ]);
    assert_eq!(back, expected);
    approx(back.duration(), out_and_back.duration(), 1e-6);
    Ok(())
}
