//! Time zone used to print timestamps

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, Utc};

/// Zone in which epoch timestamps are turned into calendar dates and times.
///
/// `Local` follows the host configuration; `Fixed` pins an offset so output
/// does not depend on where the renderer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    pub fn utc() -> Self {
        DisplayZone::Fixed(Utc.fix())
    }

    /// Offset east of UTC in seconds, `None` if out of range (±24h)
    pub fn fixed(seconds_east: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds_east).map(DisplayZone::Fixed)
    }

    /// Wall-clock date and time of `instant` in this zone
    pub fn to_wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

impl std::fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayZone::Local => write!(f, "local"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl std::str::FromStr for DisplayZone {
    type Err = String;

    /// Accepts `local`, `utc`/`z`, `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        match raw.to_lowercase().as_str() {
            "local" => return Ok(DisplayZone::Local),
            "utc" | "z" => return Ok(DisplayZone::utc()),
            _ => {}
        }

        let invalid = || format!("Invalid time zone '{}': use local, utc or +HH:MM", raw);

        let (sign, rest) = if let Some(rest) = raw.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = raw.strip_prefix('-') {
            (-1, rest)
        } else {
            return Err(invalid());
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let (hours, minutes) = match digits.len() {
            2 => (digits.as_str(), "0"),
            4 => digits.split_at(2),
            _ => return Err(invalid()),
        };
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        DisplayZone::fixed(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_zones() {
        assert_eq!("local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!("UTC".parse::<DisplayZone>().unwrap(), DisplayZone::utc());
        assert_eq!("Z".parse::<DisplayZone>().unwrap(), DisplayZone::utc());
        assert_eq!(
            "+01:00".parse::<DisplayZone>().unwrap(),
            DisplayZone::fixed(3600).unwrap()
        );
        assert_eq!(
            "-0530".parse::<DisplayZone>().unwrap(),
            DisplayZone::fixed(-(5 * 3600 + 30 * 60)).unwrap()
        );
        assert_eq!(
            "+02".parse::<DisplayZone>().unwrap(),
            DisplayZone::fixed(7200).unwrap()
        );
    }

    #[test]
    fn test_reject_bad_zones() {
        for raw in ["Europe/Madrid", "+1:00", "+01:75", "+25:00", "", "01:00"] {
            assert!(raw.parse::<DisplayZone>().is_err(), "{} should fail", raw);
        }
    }

    #[test]
    fn test_fixed_zone_wall_clock() {
        let instant = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
        let madrid_winter = DisplayZone::fixed(3600).unwrap();
        assert_eq!(
            madrid_winter.to_wall_clock(instant).to_string(),
            "2024-01-01 01:00:00"
        );
        assert_eq!(
            DisplayZone::utc().to_wall_clock(instant).to_string(),
            "2024-01-01 00:00:00"
        );
    }

    #[test]
    fn test_display_round_trips() {
        let zone: DisplayZone = "+01:00".parse().unwrap();
        assert_eq!(zone.to_string().parse::<DisplayZone>().unwrap(), zone);
        assert_eq!(DisplayZone::Local.to_string(), "local");
    }
}
