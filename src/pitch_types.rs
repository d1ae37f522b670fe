//! Display names and colors for Statcast pitch codes and team abbreviations.

const PITCH_TYPES: &[(&str, &str, (u8, u8, u8))] = &[
    ("CH", "Changeup", (0x42, 0xA5, 0xF5)),
    ("CU", "Curveball", (0x66, 0xBB, 0x6A)),
    ("FC", "Cutter", (0xFF, 0x70, 0x43)),
    ("EP", "Eephus", (0xAB, 0x47, 0xBC)),
    ("FO", "Forkball", (0xFF, 0xEB, 0x3B)),
    ("FF", "Four-Seam Fastball", (0xE5, 0x39, 0x35)),
    ("KN", "Knuckleball", (0x8E, 0x24, 0xAA)),
    ("KC", "Knuckle-curve", (0x5C, 0x6B, 0xC0)),
    ("SC", "Screwball", (0x7B, 0x1F, 0xA2)),
    ("SI", "Sinker", (0x00, 0x96, 0x88)),
    ("SL", "Slider", (0x02, 0x88, 0xD1)),
    ("SV", "Slurve", (0xF5, 0x7C, 0x00)),
    ("FS", "Splitter", (0xB7, 0x1C, 0x1C)),
    ("ST", "Sweeper", (0x1E, 0x88, 0xE5)),
];

const UNKNOWN_PITCH_COLOR: (u8, u8, u8) = (0xCC, 0xCC, 0xCC);

/// Full pitch name, falling back to the code itself.
pub fn pitch_name(code: &str) -> &str {
    PITCH_TYPES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
        .unwrap_or(code)
}

pub fn pitch_color(code: &str) -> (u8, u8, u8) {
    PITCH_TYPES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, rgb)| *rgb)
        .unwrap_or(UNKNOWN_PITCH_COLOR)
}

pub fn team_name(abbr: &str) -> &'static str {
    match abbr {
        "ARI" => "Diamondbacks",
        "ATL" => "Braves",
        "BAL" => "Orioles",
        "BOS" => "Red Sox",
        "CHC" => "Cubs",
        "CHW" | "CWS" => "White Sox",
        "CIN" => "Reds",
        "CLE" => "Guardians",
        "COL" => "Rockies",
        "DET" => "Tigers",
        "FLA" => "Marlins",
        "HOU" => "Astros",
        "KAN" => "Royals",
        "LAA" => "Angels",
        "LAD" => "Dodgers",
        "MIL" => "Brewers",
        "MIN" => "Twins",
        "NYM" => "Mets",
        "NYY" => "Yankees",
        "OAK" => "Athletics",
        "PHI" => "Phillies",
        "PIT" => "Pirates",
        "SD" => "Padres",
        "SF" => "Giants",
        "SEA" => "Mariners",
        "STL" => "Cardinals",
        "TB" => "Rays",
        "TEX" => "Rangers",
        "TOR" => "Blue Jays",
        "WAS" => "Nationals",
        _ => "Unknown Team",
    }
}

pub fn position_label(pos: &str) -> &'static str {
    match pos {
        "SP" => "Starting Pitcher",
        "RP" => "Relief Pitcher",
        _ => "Pitcher",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(pitch_name("FF"), "Four-Seam Fastball");
        assert_eq!(pitch_name("ZZ"), "ZZ");
        assert_eq!(pitch_color("ZZ"), UNKNOWN_PITCH_COLOR);
        assert_eq!(team_name("CWS"), "White Sox");
        assert_eq!(team_name("XXX"), "Unknown Team");
    }
}
