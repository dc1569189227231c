//! Unit tests for dm-agent.

use dm_core::{AgentId, GridBounds, GridPos, MessageId, Population, Tick};

use crate::{AgentStore, AgentStoreBuilder, Message, MessageContent, Role, RoleKind, Status};

fn bounds(w: u32, h: u32) -> GridBounds {
    GridBounds::new(w, h).unwrap()
}

fn roster(agents: Vec<(Role, GridPos)>) -> AgentStore {
    let (store, _rngs) = AgentStoreBuilder::from_roster(agents, 0)
        .build(bounds(5, 5))
        .unwrap();
    store
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn role_blocks_in_id_order() {
        let (store, rngs) = AgentStoreBuilder::new(Population::new(3, 2, 1, 1), 7)
            .build(bounds(10, 10))
            .unwrap();
        assert_eq!(store.count, 7);
        assert_eq!(rngs.len(), 7);
        let kinds: Vec<RoleKind> = store.roles().iter().map(Role::kind).collect();
        assert_eq!(
            kinds,
            vec![
                RoleKind::Citizen,
                RoleKind::Citizen,
                RoleKind::Citizen,
                RoleKind::Dealer,
                RoleKind::Dealer,
                RoleKind::Police,
                RoleKind::DataCollector,
            ]
        );
    }

    #[test]
    fn everyone_starts_active_and_in_bounds() {
        let b = bounds(4, 3);
        let (store, _) = AgentStoreBuilder::new(Population::new(40, 10, 5, 5), 1)
            .build(b)
            .unwrap();
        for view in store.views() {
            assert_eq!(view.status, Status::Active);
            assert!(b.contains(view.position), "{view:?}");
            assert!(store.inbox(view.id).is_empty());
        }
    }

    #[test]
    fn citizens_carry_trust_in_range() {
        let (store, _) = AgentStoreBuilder::new(Population::new(200, 0, 0, 0), 3)
            .build(bounds(10, 10))
            .unwrap();
        for role in store.roles() {
            let trust = role.trust_level().expect("citizen has trust");
            assert!(trust <= 100);
        }
    }

    #[test]
    fn placement_is_seed_deterministic() {
        let pop = Population::new(20, 3, 3, 2);
        let (a, _) = AgentStoreBuilder::new(pop, 11).build(bounds(8, 8)).unwrap();
        let (b, _) = AgentStoreBuilder::new(pop, 11).build(bounds(8, 8)).unwrap();
        let (c, _) = AgentStoreBuilder::new(pop, 12).build(bounds(8, 8)).unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.roles(), b.roles());
        assert_ne!(a.positions(), c.positions());
    }

    #[test]
    fn empty_population_is_legal() {
        let (store, rngs) = AgentStoreBuilder::new(Population::new(0, 0, 0, 0), 0)
            .build(bounds(1, 1))
            .unwrap();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
    }

    #[test]
    fn roster_rejects_out_of_bounds() {
        let result = AgentStoreBuilder::from_roster(vec![(Role::Dealer, GridPos::new(5, 0))], 0)
            .build(bounds(5, 5));
        assert!(result.is_err());
    }

    #[test]
    fn roster_rejects_arrested_start() {
        let result = AgentStoreBuilder::from_roster(vec![(Role::Arrested, GridPos::new(0, 0))], 0)
            .build(bounds(5, 5));
        assert!(result.is_err());
    }

    #[test]
    fn roster_rejects_trust_above_100() {
        let result = AgentStoreBuilder::from_roster(
            vec![(Role::Citizen { trust_level: 101 }, GridPos::new(0, 0))],
            0,
        )
        .build(bounds(5, 5));
        assert!(result.is_err());
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod transition_tests {
    use super::*;

    #[test]
    fn citizen_converts_once() {
        let mut store = roster(vec![(Role::Citizen { trust_level: 50 }, GridPos::new(0, 0))]);
        assert!(store.convert_to_drug_user(AgentId(0)));
        assert_eq!(store.role(AgentId(0)), Role::DrugUser);
        assert!(!store.convert_to_drug_user(AgentId(0)));
    }

    #[test]
    fn only_citizens_convert() {
        let mut store = roster(vec![
            (Role::Dealer, GridPos::new(0, 0)),
            (Role::Police, GridPos::new(0, 0)),
            (Role::DataCollector, GridPos::new(0, 0)),
        ]);
        for id in store.agent_ids().collect::<Vec<_>>() {
            assert!(!store.convert_to_drug_user(id));
        }
    }

    #[test]
    fn arrest_deactivates_offenders() {
        let mut store = roster(vec![
            (Role::Dealer, GridPos::new(0, 0)),
            (Role::DrugUser, GridPos::new(0, 0)),
        ]);
        assert_eq!(store.arrest(AgentId(0)), Some(Role::Dealer));
        assert_eq!(store.arrest(AgentId(1)), Some(Role::DrugUser));
        for id in [AgentId(0), AgentId(1)] {
            assert_eq!(store.role(id), Role::Arrested);
            assert_eq!(store.status(id), Status::Inactive);
        }
    }

    #[test]
    fn arrest_is_not_repeatable() {
        let mut store = roster(vec![(Role::Dealer, GridPos::new(0, 0))]);
        assert!(store.arrest(AgentId(0)).is_some());
        assert!(store.arrest(AgentId(0)).is_none());
    }

    #[test]
    fn non_offenders_cannot_be_arrested() {
        let mut store = roster(vec![
            (Role::Citizen { trust_level: 1 }, GridPos::new(0, 0)),
            (Role::Police, GridPos::new(0, 0)),
            (Role::DataCollector, GridPos::new(0, 0)),
        ]);
        for id in store.agent_ids().collect::<Vec<_>>() {
            assert!(store.arrest(id).is_none());
            assert!(store.is_active(id));
        }
    }

    #[test]
    fn inactive_agents_do_not_move() {
        let mut store = roster(vec![(Role::Dealer, GridPos::new(1, 1))]);
        assert_eq!(store.set_position(AgentId(0), GridPos::new(2, 2)), Some(GridPos::new(1, 1)));
        store.arrest(AgentId(0));
        assert_eq!(store.set_position(AgentId(0), GridPos::new(3, 3)), None);
        assert_eq!(store.position(AgentId(0)), GridPos::new(2, 2));
    }

    #[test]
    fn count_where_tracks_status() {
        let mut store = roster(vec![
            (Role::Dealer, GridPos::new(0, 0)),
            (Role::Dealer, GridPos::new(0, 0)),
        ]);
        store.arrest(AgentId(1));
        assert_eq!(store.count_where(|r, s| r == Role::Dealer && s.is_active()), 1);
        assert_eq!(store.count_where(|r, _| r == Role::Arrested), 1);
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod message_tests {
    use super::*;

    #[test]
    fn content_text_matches_protocol() {
        assert_eq!(MessageContent::DrugActivityDetected.to_string(), "Drug activity detected");
        assert_eq!(MessageContent::StaySafe.to_string(), "Stay safe, drug activity nearby");
    }

    #[test]
    fn deliver_appends_in_order() {
        let mut store = roster(vec![
            (Role::DataCollector, GridPos::new(0, 0)),
            (Role::Police, GridPos::new(0, 0)),
        ]);
        for seq in 0..3 {
            store.deliver(Message {
                id:       MessageId(seq),
                tick:     Tick(seq),
                sender:   AgentId(0),
                receiver: AgentId(1),
                content:  MessageContent::DrugActivityDetected,
            });
        }
        let inbox = store.inbox(AgentId(1));
        assert_eq!(inbox.len(), 3);
        assert!(inbox.windows(2).all(|w| w[0].id < w[1].id));
        assert!(store.inbox(AgentId(0)).is_empty());
    }

    #[test]
    fn recipients_are_police_and_citizens() {
        assert!(Role::Police.is_message_recipient());
        assert!(Role::Citizen { trust_level: 0 }.is_message_recipient());
        assert!(!Role::DrugUser.is_message_recipient());
        assert!(!Role::Dealer.is_message_recipient());
        assert!(!Role::DataCollector.is_message_recipient());
    }

    #[test]
    fn role_names() {
        let names: Vec<&str> = RoleKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["citizen", "drug-user", "dealer", "police", "data-collector", "arrested"]
        );
    }
}
