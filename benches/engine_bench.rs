use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use element_duel::combat::execute_skill;
use element_duel::content::standard_roster;
use element_duel::dice::{check_cost, roll_dice, SeededRng};
use element_duel::engine::{apply, Action};
use element_duel::model::{
    Cost, CostElement, Element, GameState, Phase, PlayerState, SideId, DICE_FACES,
};
use element_duel::reaction::resolve;
use element_duel::selfplay::{self, SimConfig};

/// Diluc, Paimon, Raiden against Qiqi, Sayu, Qianqian, mid-action phase.
fn duel() -> GameState {
    let roster = standard_roster();
    let mut state = GameState::new();
    state.phase = Phase::Action;
    state.player = PlayerState::with_roster(SideId::Player, roster.instantiate(&[5, 2, 8], SideId::Player));
    state.enemy = PlayerState::with_roster(SideId::Enemy, roster.instantiate(&[0, 1, 4], SideId::Enemy));
    state.player.dice = vec![Element::Omni; 8];
    state.enemy.dice = vec![Element::Omni; 8];
    state
}

fn bench_resolve_reactions(c: &mut Criterion) {
    let auras = [
        None,
        Some(Element::Pyro),
        Some(Element::Hydro),
        Some(Element::Electro),
        Some(Element::Cryo),
        Some(Element::Dendro),
    ];
    c.bench_function("resolve_all_aura_incoming_pairs", |b| {
        b.iter(|| {
            for aura in auras {
                for incoming in DICE_FACES.iter().take(7) {
                    let _ = resolve(black_box(4), black_box(*incoming), black_box(aura), &[]);
                }
            }
        })
    });
}

fn bench_check_cost(c: &mut Criterion) {
    let mut rng = SeededRng::new(1);
    let dice = roll_dice(8, &mut rng);
    let costs = [
        Cost::dice(Element::Pyro, 3),
        Cost { element: CostElement::Any, count: 4, energy: None },
        Cost::burst(Element::Electro, 4, 3),
    ];
    c.bench_function("check_cost_8_dice", |b| {
        b.iter(|| {
            for cost in &costs {
                let _ = check_cost(black_box(cost), black_box(&dice));
            }
        })
    });
}

fn bench_execute_skill(c: &mut Criterion) {
    let base = duel();
    let skill = base.player.active().unwrap().skills[1].clone();
    c.bench_function("execute_skill_elemental", |b| {
        b.iter(|| {
            let mut state = base.clone();
            execute_skill(black_box(&mut state), SideId::Player, black_box(&skill), &[0, 1])
        })
    });
}

fn bench_apply_auto_turn(c: &mut Criterion) {
    let roster = standard_roster();
    let base = duel();
    let action = Action::AutoTurn { side: SideId::Player };
    c.bench_function("apply_auto_turn", |b| {
        let mut rng = SeededRng::new(3);
        b.iter(|| apply(black_box(&base), black_box(&action), &roster, &mut rng))
    });
}

fn bench_full_match(c: &mut Criterion) {
    let roster = standard_roster();
    let config = SimConfig { num_games: 1, threads: 1, seed: 9, quiet: true, ..Default::default() };
    let mut group = c.benchmark_group("simulation");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));
    group.bench_function("single_match", |b| {
        b.iter(|| {
            let mut rng = SeededRng::new(black_box(9));
            selfplay::play_game(&config, &roster, 0, &mut rng)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_reactions,
    bench_check_cost,
    bench_execute_skill,
    bench_apply_auto_turn,
    bench_full_match,
);
criterion_main!(benches);
