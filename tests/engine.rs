mod support;

mod tests {
    use myrtio_pwm_composer::registers::DEFAULT_ADDRESS;
    use myrtio_pwm_composer::{
        ColorChannel, EffectMode, InvalidStripId, RenderResult, StripEffectEngine,
        StripTargetState, resolve,
    };

    use super::support::RecordingBus;

    fn regs(strip: u8, channel: ColorChannel) -> myrtio_pwm_composer::ChannelRegisterSet {
        resolve(strip, channel).unwrap()
    }

    fn scenario_target() -> StripTargetState {
        StripTargetState {
            power: true,
            brightness: 255,
            red: 255,
            green: 128,
            blue: 0,
            cold_white: 0,
            warm_white: 0,
            effect: EffectMode::None,
        }
    }

    #[test]
    fn test_power_on_renders_four_channels() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let target = scenario_target();

        let result = engine.render_strip(&mut bus, 1, &target);

        assert_eq!(result, Ok(RenderResult::Applied));
        assert_eq!(bus.writes.len(), 16);
        assert!(bus.writes.iter().all(|&(device, _, _)| device == DEFAULT_ADDRESS));
        assert_eq!(bus.on_count(regs(1, ColorChannel::Red)), 4095);
        assert_eq!(bus.on_count(regs(1, ColorChannel::Green)), 2056);
        assert_eq!(bus.on_count(regs(1, ColorChannel::Blue)), 0);
        assert_eq!(bus.on_count(regs(1, ColorChannel::ColdWhite)), 0);
        for channel in [
            ColorChannel::Red,
            ColorChannel::Green,
            ColorChannel::Blue,
            ColorChannel::ColdWhite,
        ] {
            assert!(bus.touched(regs(1, channel)));
            assert_eq!(bus.off_count(regs(1, channel)), 4095);
        }
        assert!(!bus.touched(regs(1, ColorChannel::WarmWhite)));
        assert_eq!(engine.snapshot(1), Ok(&target));
    }

    #[test]
    fn test_write_order_within_channel() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        engine.render_strip(&mut bus, 1, &scenario_target()).unwrap();

        let red = regs(1, ColorChannel::Red);
        let first: Vec<(u8, u8)> = bus.writes[..4].iter().map(|&(_, r, v)| (r, v)).collect();
        assert_eq!(
            first,
            vec![(red.on_l, 0xFF), (red.on_h, 0x0F), (red.off_l, 0xFF), (red.off_h, 0x0F)]
        );
    }

    #[test]
    fn test_unchanged_target_skips_bus() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let target = scenario_target();

        assert_eq!(engine.render_strip(&mut bus, 1, &target), Ok(RenderResult::Applied));
        bus.clear();

        assert_eq!(engine.render_strip(&mut bus, 1, &target), Ok(RenderResult::Unchanged));
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_initial_off_target_is_unchanged() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);

        let result = engine.render_strip(&mut bus, 2, &StripTargetState::default());

        assert_eq!(result, Ok(RenderResult::Unchanged));
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_power_off_forces_zero_and_keeps_color() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let mut target = StripTargetState {
            red: 200,
            green: 50,
            blue: 10,
            cold_white: 90,
            ..scenario_target()
        };
        engine.render_strip(&mut bus, 2, &target).unwrap();
        assert_ne!(bus.on_count(regs(2, ColorChannel::Red)), 0);
        bus.clear();

        target.power = false;
        assert_eq!(engine.render_strip(&mut bus, 2, &target), Ok(RenderResult::Applied));

        assert_eq!(bus.writes.len(), 16);
        for channel in [
            ColorChannel::Red,
            ColorChannel::Green,
            ColorChannel::Blue,
            ColorChannel::ColdWhite,
        ] {
            assert_eq!(bus.on_count(regs(2, channel)), 0);
        }
        let snapshot = engine.snapshot(2).unwrap();
        assert!(!snapshot.power);
        assert_eq!(snapshot.red, 200);
        assert_eq!(snapshot.cold_white, 90);
    }

    #[test]
    fn test_power_on_restores_color() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let mut target = StripTargetState {
            red: 200,
            ..scenario_target()
        };
        engine.render_strip(&mut bus, 1, &target).unwrap();
        target.power = false;
        engine.render_strip(&mut bus, 1, &target).unwrap();
        target.power = true;
        engine.render_strip(&mut bus, 1, &target).unwrap();

        // 200 * 4095 / 255 = 3211.76
        assert_eq!(bus.on_count(regs(1, ColorChannel::Red)), 3212);
    }

    #[test]
    fn test_warm_white_is_not_driven() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let target = StripTargetState {
            warm_white: 255,
            ..scenario_target()
        };

        engine.render_strip(&mut bus, 1, &target).unwrap();

        assert!(!bus.touched(regs(1, ColorChannel::WarmWhite)));
        assert_eq!(engine.snapshot(1).unwrap().warm_white, 255);
    }

    #[test]
    fn test_strips_are_independent() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);

        engine.render_strip(&mut bus, 2, &scenario_target()).unwrap();

        assert_eq!(bus.on_count(regs(2, ColorChannel::Red)), 4095);
        assert!(!bus.touched(regs(1, ColorChannel::Red)));
        assert_eq!(engine.snapshot(1), Ok(&StripTargetState::OFF));
    }

    #[test]
    fn test_other_effects_are_noops() {
        for effect in [
            EffectMode::Alarm,
            EffectMode::Music,
            EffectMode::Sleep,
            EffectMode::Weekend,
            EffectMode::Rgb,
            EffectMode::Cw,
            EffectMode::Ww,
            EffectMode::RgbCw,
            EffectMode::RgbWw,
            EffectMode::CwWw,
        ] {
            let mut bus = RecordingBus::new();
            let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
            let target = StripTargetState {
                effect,
                ..scenario_target()
            };

            assert_eq!(engine.render_strip(&mut bus, 1, &target), Ok(RenderResult::Applied));
            assert!(bus.writes.is_empty(), "{effect:?} wrote to the bus");
            assert_eq!(engine.snapshot(1), Ok(&target));
        }
    }

    #[test]
    fn test_invalid_strip_is_rejected() {
        let mut bus = RecordingBus::new();
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);

        let result = engine.render_strip(&mut bus, 3, &scenario_target());

        assert_eq!(result, Err(InvalidStripId(3)));
        assert!(bus.writes.is_empty());
        assert_eq!(engine.snapshot(3), Err(InvalidStripId(3)));
    }

    #[test]
    fn test_bus_failure_is_partial_and_commits_snapshot() {
        let mut bus = RecordingBus::new();
        let green = regs(1, ColorChannel::Green);
        bus.failing_writes.push(green.on_h);
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let target = scenario_target();

        let result = engine.render_strip(&mut bus, 1, &target).unwrap();

        match result {
            RenderResult::PartialFailure {
                failed_channels,
                error,
            } => {
                assert_eq!(failed_channels, 1);
                assert_eq!(error.register, green.on_h);
                assert_eq!(error.device, DEFAULT_ADDRESS);
            }
            other => panic!("unexpected result {other:?}"),
        }
        // Every write was still attempted
        assert_eq!(bus.writes.len(), 16);
        assert_eq!(bus.on_count(regs(1, ColorChannel::Red)), 4095);
        assert_eq!(engine.snapshot(1), Ok(&target));

        // No retry on the next cycle
        bus.clear();
        assert_eq!(engine.render_strip(&mut bus, 1, &target), Ok(RenderResult::Unchanged));
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_failures_on_several_channels_keep_first_error() {
        let mut bus = RecordingBus::new();
        let green = regs(1, ColorChannel::Green);
        let blue = regs(1, ColorChannel::Blue);
        let cold_white = regs(1, ColorChannel::ColdWhite);
        // Two failures inside blue still count as one channel
        bus.failing_writes
            .extend([cold_white.on_l, blue.on_l, blue.off_h, green.off_h]);
        let mut engine = StripEffectEngine::new(DEFAULT_ADDRESS);
        let target = scenario_target();

        let result = engine.render_strip(&mut bus, 1, &target).unwrap();

        match result {
            RenderResult::PartialFailure {
                failed_channels,
                error,
            } => {
                assert_eq!(failed_channels, 3);
                // Green is written before blue and cold white
                assert_eq!(error.register, green.off_h);
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(bus.writes.len(), 16);
        assert_eq!(bus.on_count(regs(1, ColorChannel::Red)), 4095);
        assert_eq!(bus.on_count(green), 2056);
        assert_eq!(engine.snapshot(1), Ok(&target));
    }
}
