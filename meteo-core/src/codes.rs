//! WMO weather-code descriptions.
//!
//! The backend passes Open-Meteo WMO codes through untouched; this table maps
//! the codes the UI knows about to display strings. Codes are matched exactly,
//! never by range.

/// Description used for any code outside the table.
pub const UNKNOWN_CONDITION: &str = "Неизвестно";

/// Human-readable description for a WMO weather code.
#[must_use]
pub const fn description(code: u16) -> &'static str {
    match code {
        0 => "Ясно",
        1 => "Преимущественно ясно",
        2 => "Переменная облачность",
        3 => "Пасмурно",
        45 => "Туман",
        48 => "Изморозь",
        51 => "Легкая морось",
        53 => "Умеренная морось",
        55 => "Сильная морось",
        61 => "Небольшой дождь",
        63 => "Умеренный дождь",
        65 => "Сильный дождь",
        71 => "Небольшой снег",
        73 => "Умеренный снег",
        75 => "Сильный снег",
        77 => "Снежная крупа",
        80 => "Небольшой ливень",
        81 => "Умеренный ливень",
        82 => "Сильный ливень",
        85 => "Небольшой снегопад",
        86 => "Сильный снегопад",
        95 => "Гроза",
        96 => "Гроза с небольшим градом",
        99 => "Гроза с сильным градом",
        _ => UNKNOWN_CONDITION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(description(0), "Ясно");
        assert_eq!(description(1), "Преимущественно ясно");
        assert_eq!(description(2), "Переменная облачность");
        assert_eq!(description(45), "Туман");
        assert_eq!(description(61), "Небольшой дождь");
        assert_eq!(description(75), "Сильный снег");
        assert_eq!(description(95), "Гроза");
        assert_eq!(description(99), "Гроза с сильным градом");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(description(4), UNKNOWN_CONDITION);
        assert_eq!(description(54), UNKNOWN_CONDITION);
        assert_eq!(description(999), UNKNOWN_CONDITION);
    }

    #[test]
    fn neighbours_of_table_entries_are_not_matched_by_range() {
        // 44 and 46 sit either side of 45 and must not inherit its label.
        assert_eq!(description(44), UNKNOWN_CONDITION);
        assert_eq!(description(46), UNKNOWN_CONDITION);
        assert_eq!(description(83), UNKNOWN_CONDITION);
        assert_eq!(description(97), UNKNOWN_CONDITION);
    }
}
