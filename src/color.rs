use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Color temperature of the warm white LEDs.
pub const WARM_WHITE_KELVIN: u16 = 2700;
/// Color temperature of the cold white LEDs.
pub const COLD_WHITE_KELVIN: u16 = 6500;

/// Split a white balance into cold and warm white levels.
///
/// Linear mix between the two LED temperatures, the levels always add up to
/// 255. Temperatures outside the LED range are clamped.
pub const fn white_balance(kelvin: u16) -> (u8, u8) {
    let kelvin = if kelvin < WARM_WHITE_KELVIN {
        WARM_WHITE_KELVIN
    } else if kelvin > COLD_WHITE_KELVIN {
        COLD_WHITE_KELVIN
    } else {
        kelvin
    };
    let span = (COLD_WHITE_KELVIN - WARM_WHITE_KELVIN) as u32;
    let offset = (kelvin - WARM_WHITE_KELVIN) as u32;
    #[allow(clippy::cast_possible_truncation)]
    let cold = ((offset * 255 + span / 2) / span) as u8;
    (cold, 255 - cold)
}

