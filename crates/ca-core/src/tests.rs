//! Unit tests for ca-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CitizenId, EntityId};

    #[test]
    fn ordering() {
        assert!(CitizenId(0) < CitizenId(1));
        assert!(EntityId(100) > EntityId(99));
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(CitizenId::default(), CitizenId::INVALID);
        assert!(!EntityId::default().is_valid());
        assert!(EntityId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(CitizenId(7).to_string(), "CitizenId(7)");
    }
}

#[cfg(test)]
mod pos {
    use crate::BlockPos;

    #[test]
    fn distance_and_radius() {
        let a = BlockPos::new(0, 64, 0);
        let b = BlockPos::new(3, 64, 4);
        assert_eq!(a.distance_sq(b), 25);
        assert!(a.within(b, 5));
        assert!(!a.within(b, 4));
    }

    #[test]
    fn step_toward_moves_one_block_per_axis() {
        let a = BlockPos::new(0, 64, 0);
        let target = BlockPos::new(5, 62, 0);
        assert_eq!(a.step_toward(target), BlockPos::new(1, 63, 0));
        assert_eq!(target.step_toward(target), target);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(10).since(Tick(15)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(50);
        for _ in 0..1_300 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_ms(), 65_000);
        assert_eq!(clock.elapsed_ms_split(), (1, 5));
    }

    #[test]
    fn snapshot_ticks() {
        let cfg = SimConfig { snapshot_interval_ticks: 20, ..SimConfig::default() };
        assert!(cfg.is_snapshot_tick(Tick(0)));
        assert!(cfg.is_snapshot_tick(Tick(40)));
        assert!(!cfg.is_snapshot_tick(Tick(41)));

        let off = SimConfig { snapshot_interval_ticks: 0, ..SimConfig::default() };
        assert!(!off.is_snapshot_tick(Tick(0)));
    }

    #[test]
    fn zero_tick_duration_is_invalid() {
        assert!(SimConfig::default().validate().is_ok());
        let bad = SimConfig { tick_duration_ms: 0, ..SimConfig::default() };
        assert!(matches!(bad.validate(), Err(crate::CoreError::Config(_))));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentRng, CitizenId};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, CitizenId(0));
        let mut r2 = AgentRng::new(12345, CitizenId(0));
        for _ in 0..100 {
            assert_eq!(r1.percent(), r2.percent());
        }
    }

    #[test]
    fn different_citizens_differ() {
        let mut r0 = AgentRng::new(1, CitizenId(0));
        let mut r1 = AgentRng::new(1, CitizenId(1));
        let a: Vec<u32> = (0..16).map(|_| r0.percent()).collect();
        let b: Vec<u32> = (0..16).map(|_| r1.percent()).collect();
        assert_ne!(a, b, "seeds for adjacent citizens should diverge");
    }

    #[test]
    fn percent_in_bounds() {
        let mut rng = AgentRng::new(0, CitizenId(0));
        for _ in 0..1000 {
            assert!(rng.percent() < 100);
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, CitizenId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod item {
    use crate::{DyeColor, ItemKind, ItemStack, ToolType};

    #[test]
    fn dye_from_index() {
        assert_eq!(DyeColor::from_index(0).unwrap(), DyeColor::White);
        assert_eq!(DyeColor::from_index(14).unwrap(), DyeColor::Red);
        assert_eq!(DyeColor::from_index(15).unwrap(), DyeColor::Black);
        assert!(DyeColor::from_index(16).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(ItemStack::new(ItemKind::Wool(DyeColor::LightBlue), 3).to_string(), "3x light_blue_wool");
        assert_eq!(ItemKind::Tool(ToolType::Shears).to_string(), "shears");
    }

    #[test]
    fn tools_are_tools() {
        assert!(ItemKind::Tool(ToolType::Axe).is_tool());
        assert!(!ItemKind::Wheat.is_tool());
    }
}
