//! The built-in MARTA rail network.

use crate::domain::Line::{self, Blue, Gold, Green, Red};
use crate::domain::{DisplayPosition, GeoPoint};

use super::registry::{RegistryError, StationRegistry};

/// (name, latitude, longitude, schematic (top, left), lines)
type StationRow = (&'static str, f64, f64, (f64, f64), &'static [Line]);

const STATIONS: &[StationRow] = &[
    ("NORTH SPRINGS", 33.9455, -84.3561, (0.0, 48.0), &[Red]),
    ("SANDY SPRINGS", 33.9321, -84.3513, (8.0, 48.0), &[Red]),
    ("DUNWOODY", 33.9212, -84.3437, (16.0, 48.0), &[Red]),
    ("MEDICAL CENTER", 33.9103, -84.3515, (24.0, 48.0), &[Red]),
    ("BUCKHEAD", 33.8465, -84.3671, (31.0, 48.0), &[Red]),
    ("DORAVILLE", 33.9028, -84.2799, (0.0, 62.0), &[Gold]),
    ("CHAMBLEE", 33.8879, -84.3062, (8.0, 62.0), &[Gold]),
    ("BROOKHAVEN", 33.8600, -84.3390, (16.0, 62.0), &[Gold]),
    ("LENOX", 33.8465, -84.3566, (31.0, 58.0), &[Gold]),
    ("LINDBERGH CENTER", 33.8231, -84.3692, (39.0, 48.0), &[Red, Gold]),
    ("ARTS CENTER", 33.7893, -84.3871, (46.0, 48.0), &[Red, Gold]),
    ("MIDTOWN", 33.7812, -84.3862, (51.0, 48.0), &[Red, Gold]),
    ("NORTH AVENUE", 33.7712, -84.3869, (56.0, 48.0), &[Red, Gold]),
    ("CIVIC CENTER", 33.7663, -84.3872, (61.0, 48.0), &[Red, Gold]),
    ("PEACHTREE CENTER", 33.7590, -84.3876, (66.0, 48.0), &[Red, Gold]),
    ("FIVE POINTS", 33.7542, -84.3919, (72.0, 48.0), &[Red, Gold, Green, Blue]),
    ("GARNETT", 33.7480, -84.3952, (78.0, 48.0), &[Red, Gold]),
    ("WEST END", 33.7352, -84.4132, (85.0, 42.0), &[Red, Gold]),
    ("OAKLAND CITY", 33.7163, -84.4255, (90.0, 42.0), &[Red, Gold]),
    ("LAKEWOOD", 33.7002, -84.4297, (95.0, 42.0), &[Red, Gold]),
    ("EAST POINT", 33.6768, -84.4408, (100.0, 42.0), &[Red, Gold]),
    ("COLLEGE PARK", 33.6513, -84.4488, (105.0, 42.0), &[Red, Gold]),
    ("AIRPORT", 33.6407, -84.4444, (110.0, 42.0), &[Red, Gold]),
    ("BANKHEAD", 33.7723, -84.4289, (72.0, 25.0), &[Green]),
    ("INDIAN CREEK", 33.7699, -84.2291, (72.0, 111.0), &[Blue]),
    ("KENSINGTON", 33.7720, -84.2499, (72.0, 104.0), &[Blue]),
    ("AVONDALE", 33.7753, -84.2808, (72.0, 97.0), &[Blue]),
    ("DECATUR", 33.7748, -84.2952, (72.0, 90.0), &[Blue]),
    ("EAST LAKE", 33.7650, -84.3121, (72.0, 83.0), &[Blue]),
    ("INMAN PARK", 33.7570, -84.3524, (72.0, 69.0), &[Green, Blue]),
    ("KING MEMORIAL", 33.7501, -84.3755, (72.0, 62.0), &[Green, Blue]),
    ("GEORGIA STATE", 33.7502, -84.3863, (72.0, 55.0), &[Green, Blue]),
    ("OMNI", 33.7592, -84.3977, (72.0, 41.0), &[Green, Blue]),
    ("VINE CITY", 33.7563, -84.4044, (72.0, 36.0), &[Green, Blue]),
    ("ASHBY", 33.7562, -84.4170, (72.0, 32.0), &[Green, Blue]),
];

const RED_LINE: &[&str] = &[
    "NORTH SPRINGS",
    "SANDY SPRINGS",
    "DUNWOODY",
    "MEDICAL CENTER",
    "BUCKHEAD",
    "LINDBERGH CENTER",
    "ARTS CENTER",
    "MIDTOWN",
    "NORTH AVENUE",
    "CIVIC CENTER",
    "PEACHTREE CENTER",
    "FIVE POINTS",
    "GARNETT",
    "WEST END",
    "OAKLAND CITY",
    "LAKEWOOD",
    "EAST POINT",
    "COLLEGE PARK",
    "AIRPORT",
];

const GOLD_LINE: &[&str] = &[
    "DORAVILLE",
    "CHAMBLEE",
    "BROOKHAVEN",
    "LENOX",
    "LINDBERGH CENTER",
    "ARTS CENTER",
    "MIDTOWN",
    "NORTH AVENUE",
    "CIVIC CENTER",
    "PEACHTREE CENTER",
    "FIVE POINTS",
    "GARNETT",
    "WEST END",
    "OAKLAND CITY",
    "LAKEWOOD",
    "EAST POINT",
    "COLLEGE PARK",
    "AIRPORT",
];

const GREEN_LINE: &[&str] = &[
    "BANKHEAD",
    "ASHBY",
    "VINE CITY",
    "OMNI",
    "FIVE POINTS",
    "GEORGIA STATE",
    "KING MEMORIAL",
    "INMAN PARK",
];

const BLUE_LINE: &[&str] = &[
    "INDIAN CREEK",
    "KENSINGTON",
    "AVONDALE",
    "DECATUR",
    "EAST LAKE",
    "INMAN PARK",
    "KING MEMORIAL",
    "GEORGIA STATE",
    "FIVE POINTS",
    "OMNI",
    "VINE CITY",
    "ASHBY",
];

const ALIASES: &[(&str, &[&str])] = &[
    (
        "AIRPORT",
        &[
            "AIRPORT STATION",
            "HARTSFIELD",
            "HARTSFIELD-JACKSON",
            "HARTSFIELD JACKSON",
            "ATL AIRPORT",
        ],
    ),
    ("ARTS CENTER", &["ARTS CENTER STATION", "WOODRUFF ARTS CENTER"]),
    (
        "BROOKHAVEN",
        &["BROOKHAVEN STATION", "BROOKHAVEN/OGLETHORPE", "OGLETHORPE"],
    ),
    ("CIVIC CENTER", &["CIVIC CENTER STATION"]),
    ("COLLEGE PARK", &["COLLEGE PARK STATION"]),
    ("DECATUR", &["DECATUR STATION"]),
    ("DORAVILLE", &["DORAVILLE STATION"]),
    ("EAST LAKE", &["EAST LAKE STATION"]),
    ("EAST POINT", &["EAST POINT STATION"]),
    ("FIVE POINTS", &["FIVE POINTS STATION"]),
    ("GARNETT", &["GARNETT STATION"]),
    ("GEORGIA STATE", &["GEORGIA STATE STATION", "GSU"]),
    ("INDIAN CREEK", &["INDIAN CREEK STATION"]),
    (
        "INMAN PARK",
        &["INMAN PARK STATION", "INMAN PARK/REYNOLDSTOWN", "REYNOLDSTOWN"],
    ),
    ("KENSINGTON", &["KENSINGTON STATION"]),
    ("KING MEMORIAL", &["KING MEMORIAL STATION", "MLK"]),
    (
        "LAKEWOOD",
        &["LAKEWOOD STATION", "LAKEWOOD/FT. MCPHERSON", "FORT MCPHERSON"],
    ),
    ("LENOX", &["LENOX STATION", "LENOX SQUARE"]),
    (
        "LINDBERGH CENTER",
        &["LINDBERGH STATION", "LINDBERGH CENTER STATION"],
    ),
    ("MEDICAL CENTER", &["MEDICAL CENTER STATION"]),
    ("MIDTOWN", &["MIDTOWN STATION"]),
    ("NORTH AVENUE", &["NORTH AVENUE STATION", "NORTH AVE"]),
    ("NORTH SPRINGS", &["NORTH SPRINGS STATION"]),
    ("OAKLAND CITY", &["OAKLAND CITY STATION"]),
    (
        "OMNI",
        &[
            "OMNI STATION",
            "CNN",
            "CNN CENTER",
            "STATE FARM ARENA",
            "MERCEDES-BENZ STADIUM",
        ],
    ),
    ("PEACHTREE CENTER", &["PEACHTREE CENTER STATION", "PEACHTREE CTR"]),
    ("SANDY SPRINGS", &["SANDY SPRINGS STATION"]),
    ("VINE CITY", &["VINE CITY STATION"]),
    ("WEST END", &["WEST END STATION"]),
];

impl StationRegistry {
    /// The MARTA heavy-rail network: 35 stations on the Red, Gold, Green
    /// and Blue lines.
    pub fn marta() -> Result<Self, RegistryError> {
        let mut builder = StationRegistry::builder();

        for &(name, lat, lng, (top, left), lines) in STATIONS {
            builder = builder.station(
                name,
                GeoPoint::new(lat, lng),
                Some(DisplayPosition { top, left }),
                lines,
            );
        }

        builder = builder
            .line(Red, RED_LINE)
            .line(Gold, GOLD_LINE)
            .line(Green, GREEN_LINE)
            .line(Blue, BLUE_LINE);

        for &(station, aliases) in ALIASES {
            builder = builder.aliases(station, aliases);
        }

        builder.build()
    }
}
