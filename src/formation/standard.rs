//! Built-in layouts of the formations results are snapped to.

use super::Formation;
use crate::dancer::Gender::{Boy, Girl};

/// Formations tried, in order, when snapping the result of a call.
pub const STANDARD_FORMATIONS: [&str; 13] = [
    "Normal Lines",
    "Normal Lines Compact",
    "Double Pass Thru",
    "Static Square",
    "Quarter Tag",
    "Tidal Line RH",
    "Diamonds RH Girl Points",
    "Diamonds RH PTP Girl Points",
    "Hourglass RH BP",
    "Galaxy RH GP",
    "Butterfly RH",
    "O RH",
    "Sausage RH",
];

pub fn standard_formation(name: &str) -> Option<Formation> {
    let f = Formation::new(name);
    let f = match name {
        "Static Square" => f
            .couple(1, Boy, -3.0, 1.0, 0.0)
            .couple(1, Girl, -3.0, -1.0, 0.0)
            .couple(2, Boy, -1.0, -3.0, 90.0)
            .couple(2, Girl, 1.0, -3.0, 90.0),
        "Normal Lines" => f
            .dancer(Boy, -2.0, 3.0, 0.0)
            .dancer(Girl, -2.0, 1.0, 0.0)
            .dancer(Boy, -2.0, -1.0, 0.0)
            .dancer(Girl, -2.0, -3.0, 0.0),
        "Normal Lines Compact" => f
            .dancer(Boy, -1.0, 3.0, 0.0)
            .dancer(Girl, -1.0, 1.0, 0.0)
            .dancer(Boy, -1.0, -1.0, 0.0)
            .dancer(Girl, -1.0, -3.0, 0.0),
        "Double Pass Thru" => f
            .dancer(Boy, -1.0, 1.0, 0.0)
            .dancer(Girl, -1.0, -1.0, 0.0)
            .dancer(Boy, -3.0, 1.0, 0.0)
            .dancer(Girl, -3.0, -1.0, 0.0),
        "Quarter Tag" => f
            .dancer(Girl, -1.0, 0.0, 90.0)
            .dancer(Boy, -3.0, 0.0, -90.0)
            .dancer(Boy, -1.0, -2.0, 90.0)
            .dancer(Girl, 1.0, -2.0, 90.0),
        "Tidal Line RH" => f
            .dancer(Girl, -1.0, 0.0, 90.0)
            .dancer(Boy, -3.0, 0.0, 90.0)
            .dancer(Boy, -5.0, 0.0, -90.0)
            .dancer(Girl, -7.0, 0.0, -90.0),
        "Diamonds RH Girl Points" => f
            .dancer(Boy, 2.0, 0.0, 90.0)
            .dancer(Boy, 4.0, 0.0, -90.0)
            .dancer(Girl, 3.0, 2.0, 0.0)
            .dancer(Girl, 3.0, -2.0, 180.0),
        "Diamonds RH PTP Girl Points" => f
            .dancer(Boy, -1.0, 3.0, 90.0)
            .dancer(Boy, 1.0, 3.0, -90.0)
            .dancer(Girl, 0.0, 5.0, 0.0)
            .dancer(Girl, 0.0, 1.0, 180.0),
        "Hourglass RH BP" => f
            .dancer(Boy, -2.0, 3.0, 0.0)
            .dancer(Boy, 2.0, 3.0, 180.0)
            .dancer(Girl, 0.0, 1.0, 0.0)
            .dancer(Girl, 1.0, 0.0, 90.0),
        "Galaxy RH GP" => f
            .dancer(Boy, -1.0, -1.0, 0.0)
            .dancer(Boy, 1.0, -1.0, 90.0)
            .dancer(Girl, 3.0, 0.0, 90.0)
            .dancer(Girl, 0.0, 3.0, 180.0),
        "Butterfly RH" => f
            .dancer(Boy, -3.0, -3.0, 90.0)
            .dancer(Boy, 3.0, -3.0, 90.0)
            .dancer(Girl, -1.0, -1.0, 90.0)
            .dancer(Girl, 1.0, -1.0, 90.0),
        "O RH" => f
            .dancer(Boy, -3.0, -1.0, 90.0)
            .dancer(Girl, -3.0, 1.0, 90.0)
            .dancer(Boy, -1.0, 3.0, 0.0)
            .dancer(Girl, 1.0, 3.0, 0.0),
        "Sausage RH" => f
            .dancer(Boy, -1.0, -3.0, 90.0)
            .dancer(Girl, 1.0, -3.0, 90.0)
            .dancer(Boy, -3.0, 0.0, 90.0)
            .dancer(Girl, -1.0, 0.0, -90.0),
        _ => return None,
    };
    Some(f)
}
