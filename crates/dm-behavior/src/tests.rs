//! Unit tests for dm-behavior.

use dm_agent::{AgentStore, AgentStoreBuilder, MessageContent, Role};
use dm_core::{AgentId, AgentRng, GridBounds, GridPos, InteractionScope, MovementPolicy, RuleSet, Tick};
use dm_spatial::World;

use crate::{BehaviorModel, DrugMarketRules, Intent, NoopBehavior, SimContext};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

const CITIZEN: Role = Role::Citizen { trust_level: 50 };

/// A store + world pair for an explicit roster on a `w × h` grid.
fn scene(w: u32, h: u32, agents: Vec<(Role, GridPos)>) -> (AgentStore, World) {
    let bounds = GridBounds::new(w, h).unwrap();
    let (store, _rngs) = AgentStoreBuilder::from_roster(agents, 0).build(bounds).unwrap();
    let world = World::new(bounds, store.positions());
    (store, world)
}

/// Rules where every coin comes up heads.
fn certain() -> RuleSet {
    RuleSet {
        encounter_probability:    1.0,
        conversion_probability:   1.0,
        hotspot_seek_probability: 1.0,
        arrest_probability:       1.0,
        ..RuleSet::default()
    }
}

/// Rules where every coin comes up tails.
fn never() -> RuleSet {
    RuleSet {
        encounter_probability:    0.0,
        conversion_probability:   0.0,
        hotspot_seek_probability: 0.0,
        arrest_probability:       0.0,
        ..RuleSet::default()
    }
}

fn rules(set: RuleSet) -> DrugMarketRules {
    DrugMarketRules::new(set).unwrap()
}

fn rng() -> AgentRng {
    AgentRng::new(7, AgentId(0))
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(DrugMarketRules::new(RuleSet::default()).is_ok());
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let set = RuleSet { arrest_probability: 1.5, ..RuleSet::default() };
        assert!(DrugMarketRules::new(set).is_err());
        let set = RuleSet { encounter_probability: -0.1, ..RuleSet::default() };
        assert!(DrugMarketRules::new(set).is_err());
    }

    #[test]
    fn nan_probability_rejected() {
        let set = RuleSet { conversion_probability: f64::NAN, ..RuleSet::default() };
        assert!(DrugMarketRules::new(set).is_err());
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use super::*;

    #[test]
    fn clamped_moves_stay_within_one_step() {
        let (store, world) = scene(3, 3, vec![(CITIZEN, p(0, 0))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let model = rules(RuleSet::default());
        let mut r = rng();
        for _ in 0..200 {
            let to = model.movement(AgentId(0), &ctx, &mut r).expect("clamp always moves");
            assert!(world.contains(to));
            assert!(to.chebyshev(p(0, 0)) <= 1);
        }
    }

    #[test]
    fn discard_policy_sometimes_stays_at_corner() {
        let (store, world) = scene(3, 3, vec![(CITIZEN, p(0, 0))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let model = rules(RuleSet { movement: MovementPolicy::Discard, ..RuleSet::default() });
        let mut r = rng();
        let mut discarded = 0;
        for _ in 0..200 {
            match model.movement(AgentId(0), &ctx, &mut r) {
                Some(to) => assert!(world.contains(to)),
                None => discarded += 1,
            }
        }
        // 5 of the 9 offsets leave the grid from a corner.
        assert!(discarded > 0);
    }

    #[test]
    fn one_by_one_grid_pins_everyone() {
        let (store, world) = scene(1, 1, vec![(Role::Police, p(0, 0))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let model = rules(RuleSet::default());
        let mut r = rng();
        for _ in 0..20 {
            assert_eq!(model.movement(AgentId(0), &ctx, &mut r), Some(p(0, 0)));
        }
    }

    #[test]
    fn noop_neither_moves_nor_acts() {
        let (store, world) = scene(3, 3, vec![(Role::Dealer, p(1, 1))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let mut r = rng();
        assert_eq!(NoopBehavior.movement(AgentId(0), &ctx, &mut r), None);
        assert!(NoopBehavior.act(AgentId(0), &ctx, &mut r).is_empty());
    }
}

// ── Citizen ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod citizen_tests {
    use super::*;

    #[test]
    fn converts_next_to_dealer_when_coins_land() {
        let (store, world) = scene(5, 5, vec![(CITIZEN, p(2, 2)), (Role::Dealer, p(2, 2))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let intents = rules(certain()).act(AgentId(0), &ctx, &mut rng());
        assert_eq!(intents, vec![Intent::BecomeDrugUser]);
    }

    #[test]
    fn no_dealer_no_conversion() {
        let (store, world) = scene(5, 5, vec![(CITIZEN, p(2, 2)), (Role::Dealer, p(3, 3))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(certain()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }

    #[test]
    fn moore_scope_sees_adjacent_dealer() {
        let (store, world) = scene(5, 5, vec![(CITIZEN, p(2, 2)), (Role::Dealer, p(3, 3))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let set = RuleSet { interaction: InteractionScope::Moore, ..certain() };
        assert_eq!(rules(set).act(AgentId(0), &ctx, &mut rng()), vec![Intent::BecomeDrugUser]);
    }

    #[test]
    fn moore_scope_still_sees_own_cell() {
        let (store, world) = scene(5, 5, vec![(CITIZEN, p(2, 2)), (Role::Dealer, p(2, 2))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let set = RuleSet { interaction: InteractionScope::Moore, ..certain() };
        assert_eq!(rules(set).act(AgentId(0), &ctx, &mut rng()), vec![Intent::BecomeDrugUser]);
    }

    #[test]
    fn arrested_dealer_does_not_count() {
        let (mut store, world) = scene(5, 5, vec![(CITIZEN, p(2, 2)), (Role::Dealer, p(2, 2))]);
        store.arrest(AgentId(1));
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(certain()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }

    #[test]
    fn failed_coin_means_no_conversion() {
        let (store, world) = scene(5, 5, vec![(CITIZEN, p(2, 2)), (Role::Dealer, p(2, 2))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(never()).act(AgentId(0), &ctx, &mut rng()).is_empty());
        let second_fails = RuleSet { conversion_probability: 0.0, ..certain() };
        assert!(rules(second_fails).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }
}

// ── Dealer ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dealer_tests {
    use super::*;

    #[test]
    fn seeks_highest_presence_neighbor() {
        let (store, mut world) = scene(5, 5, vec![(Role::Dealer, p(2, 2))]);
        world.record_presence(p(3, 1), 2);
        world.record_presence(p(1, 3), 5);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert_eq!(rules(certain()).act(AgentId(0), &ctx, &mut rng()), vec![Intent::MoveTo(p(1, 3))]);
    }

    #[test]
    fn ties_go_to_first_in_enumeration_order() {
        let (store, mut world) = scene(5, 5, vec![(Role::Dealer, p(2, 2))]);
        world.record_presence(p(3, 1), 4);
        world.record_presence(p(1, 3), 4);
        let ctx = SimContext::new(Tick(0), &store, &world);
        // (1,3) is offset (-1,+1), enumerated before (3,1) = (+1,-1).
        assert_eq!(rules(certain()).act(AgentId(0), &ctx, &mut rng()), vec![Intent::MoveTo(p(1, 3))]);
    }

    #[test]
    fn empty_map_goes_to_first_in_bounds_cell() {
        let (store, world) = scene(5, 5, vec![(Role::Dealer, p(0, 2))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        // dx = -1 is off-grid, so the first candidate is (0,1).
        assert_eq!(rules(certain()).act(AgentId(0), &ctx, &mut rng()), vec![Intent::MoveTo(p(0, 1))]);
    }

    #[test]
    fn staying_is_not_a_move() {
        let (store, mut world) = scene(5, 5, vec![(Role::Dealer, p(2, 2))]);
        world.record_presence(p(2, 2), 9);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(certain()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }

    #[test]
    fn tails_means_no_seek() {
        let (store, mut world) = scene(5, 5, vec![(Role::Dealer, p(2, 2))]);
        world.record_presence(p(1, 1), 9);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(never()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }

    #[test]
    fn evasion_steps_diagonally_away_from_police() {
        let (store, mut world) = scene(5, 5, vec![(Role::Dealer, p(2, 2)), (Role::Police, p(2, 2))]);
        world.record_presence(p(2, 3), 9);
        let ctx = SimContext::new(Tick(0), &store, &world);
        let set = RuleSet { dealer_evasion: true, ..certain() };
        let intents = rules(set).act(AgentId(0), &ctx, &mut rng());
        match intents.as_slice() {
            [Intent::MoveTo(to)] => {
                assert_eq!(to.x.abs_diff(2), 1);
                assert_eq!(to.y.abs_diff(2), 1);
            }
            other => panic!("expected one diagonal move, got {other:?}"),
        }
    }

    #[test]
    fn evasion_disabled_ignores_police() {
        let (store, mut world) = scene(5, 5, vec![(Role::Dealer, p(2, 2)), (Role::Police, p(2, 2))]);
        world.record_presence(p(2, 3), 9);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert_eq!(rules(certain()).act(AgentId(0), &ctx, &mut rng()), vec![Intent::MoveTo(p(2, 3))]);
    }
}

// ── Police ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod police_tests {
    use super::*;

    #[test]
    fn arrests_co_located_offender() {
        let (store, world) = scene(5, 5, vec![(Role::Police, p(1, 1)), (Role::Dealer, p(1, 1))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert_eq!(rules(certain()).act(AgentId(0), &ctx, &mut rng()), vec![Intent::Arrest(AgentId(1))]);
    }

    #[test]
    fn target_is_always_an_active_offender() {
        let (mut store, world) = scene(
            5,
            5,
            vec![
                (Role::Police, p(1, 1)),
                (CITIZEN, p(1, 1)),
                (Role::Dealer, p(1, 1)),
                (Role::DrugUser, p(1, 1)),
                (Role::Dealer, p(1, 1)),
                (Role::DataCollector, p(1, 1)),
            ],
        );
        store.arrest(AgentId(4));
        let ctx = SimContext::new(Tick(0), &store, &world);
        let model = rules(certain());
        let mut r = rng();
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..100 {
            match model.act(AgentId(0), &ctx, &mut r).as_slice() {
                [Intent::Arrest(t)] => {
                    seen.insert(*t);
                }
                other => panic!("expected one arrest, got {other:?}"),
            }
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![AgentId(2), AgentId(3)]);
    }

    #[test]
    fn nobody_to_arrest_is_a_noop() {
        let (store, world) = scene(5, 5, vec![(Role::Police, p(1, 1)), (CITIZEN, p(1, 1))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(certain()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }

    #[test]
    fn same_cell_scope_ignores_adjacent_dealer() {
        let (store, world) = scene(5, 5, vec![(Role::Police, p(1, 1)), (Role::Dealer, p(2, 1))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(certain()).act(AgentId(0), &ctx, &mut rng()).is_empty());
        let moore = RuleSet { interaction: InteractionScope::Moore, ..certain() };
        assert_eq!(rules(moore).act(AgentId(0), &ctx, &mut rng()), vec![Intent::Arrest(AgentId(1))]);
    }
}

// ── Data collector ────────────────────────────────────────────────────────────

#[cfg(test)]
mod data_collector_tests {
    use super::*;

    #[test]
    fn records_user_count_and_messages_recipients() {
        let (store, world) = scene(
            5,
            5,
            vec![
                (Role::DataCollector, p(2, 2)),
                (Role::DrugUser, p(2, 2)),
                (Role::DrugUser, p(2, 2)),
                (Role::Police, p(2, 2)),
                (CITIZEN, p(2, 2)),
                (Role::Dealer, p(2, 2)),
                (CITIZEN, p(3, 3)),
            ],
        );
        let ctx = SimContext::new(Tick(0), &store, &world);
        let intents = rules(RuleSet::default()).act(AgentId(0), &ctx, &mut rng());
        assert_eq!(
            intents,
            vec![
                Intent::RecordPresence { cell: p(2, 2), amount: 2 },
                Intent::SendMessage { to: AgentId(3), content: MessageContent::DrugActivityDetected },
                Intent::SendMessage { to: AgentId(4), content: MessageContent::StaySafe },
            ]
        );
    }

    #[test]
    fn messages_sent_even_without_users() {
        let (store, world) = scene(5, 5, vec![(Role::DataCollector, p(0, 0)), (Role::Police, p(0, 0))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert_eq!(
            rules(RuleSet::default()).act(AgentId(0), &ctx, &mut rng()),
            vec![Intent::SendMessage { to: AgentId(1), content: MessageContent::DrugActivityDetected }]
        );
    }

    #[test]
    fn moore_scope_counts_adjacent_users_but_messages_same_cell_only() {
        let (store, world) = scene(
            5,
            5,
            vec![
                (Role::DataCollector, p(2, 2)),
                (Role::DrugUser, p(1, 1)),
                (Role::DrugUser, p(3, 2)),
                (Role::Police, p(2, 3)),
            ],
        );
        let ctx = SimContext::new(Tick(0), &store, &world);
        let set = RuleSet { interaction: InteractionScope::Moore, ..RuleSet::default() };
        assert_eq!(
            rules(set).act(AgentId(0), &ctx, &mut rng()),
            vec![Intent::RecordPresence { cell: p(2, 2), amount: 2 }]
        );
    }

    #[test]
    fn arrested_users_are_not_counted() {
        let (mut store, world) = scene(5, 5, vec![(Role::DataCollector, p(2, 2)), (Role::DrugUser, p(2, 2))]);
        store.arrest(AgentId(1));
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(RuleSet::default()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }
}

// ── Passive roles ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod passive_tests {
    use super::*;

    #[test]
    fn drug_users_only_move() {
        let (store, world) = scene(5, 5, vec![(Role::DrugUser, p(2, 2)), (Role::Dealer, p(2, 2))]);
        let ctx = SimContext::new(Tick(0), &store, &world);
        assert!(rules(certain()).act(AgentId(0), &ctx, &mut rng()).is_empty());
    }
}
