use crate::catalog::MATERIAL_CATALOG;
use crate::components::{CargoHold, Defenses};
use crate::enums::*;
use crate::state::DirectorSave;
use crate::templates::WaveTemplate;
use crate::types::{Position, SimTime, Velocity};

#[test]
fn test_site_kind_serde() {
    let variants = vec![
        SiteKind::Combat {
            tier: WaveTier::Elite,
            loot_credits: 2_400.0,
        },
        SiteKind::Data {
            credits: 1_100.0,
            difficulty: 0.6,
        },
        SiteKind::Relic {
            tier: 0.75,
            difficulty: 0.8,
        },
        SiteKind::GasPocket {
            gas: GasType::Mycite,
            amount: 420.0,
        },
    ];
    for v in &variants {
        let json = serde_json::to_string(v).unwrap();
        let back: SiteKind = serde_json::from_str(&json).unwrap();
        assert_eq!(*v, back);
    }
}

#[test]
fn test_wave_tier_from_danger_thresholds() {
    assert_eq!(WaveTier::from_danger(0.0), WaveTier::Easy);
    assert_eq!(WaveTier::from_danger(0.24), WaveTier::Easy);
    assert_eq!(WaveTier::from_danger(0.25), WaveTier::Normal);
    assert_eq!(WaveTier::from_danger(0.55), WaveTier::Hard);
    assert_eq!(WaveTier::from_danger(0.79), WaveTier::Hard);
    assert_eq!(WaveTier::from_danger(0.8), WaveTier::Elite);
    assert_eq!(WaveTier::from_danger(1.0), WaveTier::Elite);
}

#[test]
fn test_easy_template_totals_five_enemies() {
    let template = WaveTemplate::for_tier(WaveTier::Easy);
    assert_eq!(template.waves.len(), 2);
    assert_eq!(template.waves[0].count, 2);
    assert_eq!(template.waves[1].count, 3);
    assert_eq!(template.total_enemies(), 5);
    assert_eq!(template.waves[0].delay_secs, 0.0);
    assert_eq!(template.waves[1].delay_secs, 8.0);
}

#[test]
fn test_all_templates_nonempty() {
    for tier in [
        WaveTier::Easy,
        WaveTier::Normal,
        WaveTier::Hard,
        WaveTier::Elite,
    ] {
        let t = WaveTemplate::for_tier(tier);
        assert!(!t.waves.is_empty());
        assert!(t.waves.iter().all(|w| w.count > 0));
        assert!(t.bounty_mult >= 1.0);
    }
}

#[test]
fn test_elite_template_qualifies_for_bonus_material() {
    let t = WaveTemplate::for_tier(WaveTier::Elite);
    assert!(t.loot_mult >= crate::constants::BONUS_MATERIAL_LOOT_MULT);
}

#[test]
fn test_defenses_liveness() {
    let mut d = Defenses::new(100.0, 50.0, 80.0);
    assert!(d.is_alive());
    assert_eq!(d.total(), 230.0);
    d.hull = 0.0;
    assert!(!d.is_alive());
}

#[test]
fn test_cargo_hold_merges_stacks() {
    let mut hold = CargoHold::default();
    hold.add(TradeGood::Hydrozine, 5);
    hold.add(TradeGood::Hydrozine, 7);
    hold.add(TradeGood::SalvagedAlloy, 2);
    hold.add(TradeGood::Mycite, 0);
    assert_eq!(hold.quantity(TradeGood::Hydrozine), 12);
    assert_eq!(hold.quantity(TradeGood::SalvagedAlloy), 2);
    assert_eq!(hold.quantity(TradeGood::Mycite), 0);
    assert_eq!(hold.goods.len(), 2);
}

#[test]
fn test_cargo_hold_volume_tracks_contents() {
    let mut hold = CargoHold::default();
    assert_eq!(hold.used_volume(), 0.0);
    hold.add(TradeGood::SalvagedAlloy, 3); // 2.0 m³ each
    hold.add(TradeGood::Xenoplasm, 4); // 0.5 m³ each
    assert!((hold.used_volume() - 8.0).abs() < 1e-10);
}

#[test]
fn test_gas_type_danger_indexing() {
    assert_eq!(GasType::from_danger(0.0), GasType::Hydrozine);
    assert_eq!(GasType::from_danger(0.3), GasType::Cytoserin);
    assert_eq!(GasType::from_danger(0.6), GasType::Mycite);
    assert_eq!(GasType::from_danger(0.99), GasType::Xenoplasm);
    // Exactly 1.0 must stay in range.
    assert_eq!(GasType::from_danger(1.0), GasType::Xenoplasm);
}

#[test]
fn test_difficulty_tier_population_table() {
    assert_eq!(DifficultyTier::Hub.desired_anomalies(), 1);
    assert_eq!(DifficultyTier::Deadly.desired_anomalies(), 5);
    for tier in [
        DifficultyTier::Hub,
        DifficultyTier::Safe,
        DifficultyTier::Contested,
        DifficultyTier::Dangerous,
        DifficultyTier::Deadly,
    ] {
        let danger = tier.danger_level();
        assert!((0.0..=1.0).contains(&danger));
        assert!(tier.site_weights().iter().all(|w| *w >= 0.0));
    }
}

#[test]
fn test_material_catalog_distinct() {
    for (i, a) in MATERIAL_CATALOG.iter().enumerate() {
        for b in &MATERIAL_CATALOG[i + 1..] {
            assert_ne!(a, b);
        }
        assert!(a.unit_value() > 0.0);
    }
}

#[test]
fn test_director_save_serde() {
    let save = DirectorSave {
        completed_sites: vec![3, 17, 255],
        spawn_timer: 42.5,
    };
    let json = serde_json::to_string(&save).unwrap();
    let back: DirectorSave = serde_json::from_str(&json).unwrap();
    assert_eq!(save, back);
}

#[test]
fn test_position_distance() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    assert!((b.radial_distance() - 5.0).abs() < 1e-10);
}

#[test]
fn test_velocity_speed() {
    let v = Velocity::new(3.0, 4.0);
    assert!((v.speed() - 5.0).abs() < 1e-10);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..30 {
        time.advance();
    }
    assert_eq!(time.tick, 30);
    // 30 ticks at 30Hz = 1 second
    assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
}
