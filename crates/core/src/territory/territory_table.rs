use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::territory_model::{EncoderRole, StreetSet, Territory};
use crate::viewers::ViewerRole;

// Encoder 1: streets A-J
const ENCODER1_STREETS: &[&str] = &[
    "Aaron", "Abraham", "Adam", "Almond St", "Athena",
    "Babylonia", "Bethel",
    "Camia", "Camia St", "Carmel", "Carnation", "Cattleya Rd", "Colosse", "Cornelius",
    "Dahlia", "Daisy", "Datu Puti", "David", "Diamond",
    "Earth", "Elijah", "Emerald", "Ephesus", "Ephraim", "Everlasting",
    "Galathia", "Garnet", "Germanium", "Gladiola",
    "Humabon",
    "Ipil St", "Isaac",
    "Jacob", "Jade St", "Jasmin", "Jenemiah",
];

// Encoder 2: streets J-P
const ENCODER2_STREETS: &[&str] = &[
    "Joseph", "Joshua", "Jupiter",
    "Kabiling", "Kalantiaw", "Kalayaan", "Kapayapaan", "Kingfisher", "Kudarat", "Kulambo",
    "Kumintang",
    "Lakandula", "Lapu-Lapu", "Lilac", "Lotus",
    "Magnolia", "Maragtas", "Maricudo", "Mark", "Mars", "Matthew", "Mercury", "Minda Mora",
    "Moses",
    "Narra", "Nightingale", "Noah",
    "Panday Pira", "Paul",
];

// Encoder 3: streets P-Z
const ENCODER3_STREETS: &[&str] = &[
    "Pearl", "Peter", "Philip", "Pine Street",
    "Quintos Villa",
    "Rosal", "Rosas", "Rose", "Ruby",
    "Sampaguita", "Samson", "Samuel", "Sapphire", "Saturn", "Siagu", "Sikatuna Ave", "Silver",
    "Simeon", "Sinai", "Soliman", "Star", "Sumakwel", "Sun",
    "Tarhata", "Topaz",
    "Venus",
    "Yakal",
    "Zabarte Rd", "Zenia",
];

struct TerritoryTable {
    buckets: [StreetSet; 3],
    owners: HashMap<&'static str, EncoderRole>,
}

impl TerritoryTable {
    fn build() -> Self {
        let buckets = [
            ENCODER1_STREETS.iter().copied().collect::<StreetSet>(),
            ENCODER2_STREETS.iter().copied().collect::<StreetSet>(),
            ENCODER3_STREETS.iter().copied().collect::<StreetSet>(),
        ];

        let mut owners = HashMap::new();
        for encoder in EncoderRole::ALL {
            for street in &buckets[encoder.index()] {
                // First owner wins; the lists are disjoint so this never triggers.
                owners.entry(*street).or_insert(encoder);
            }
        }

        TerritoryTable { buckets, owners }
    }
}

static TERRITORY_TABLE: Lazy<TerritoryTable> = Lazy::new(TerritoryTable::build);

/// Resolves the territory a role may see. Only encoder roles are restricted.
pub fn resolve_territory(role: &ViewerRole) -> Territory {
    match role {
        ViewerRole::Encoder(encoder) => Territory::Streets(streets_for(*encoder)),
        _ => Territory::Universal,
    }
}

/// The encoder owning `street`, if the street is part of the known universe.
pub fn owner_of(street: &str) -> Option<EncoderRole> {
    TERRITORY_TABLE.owners.get(street.trim()).copied()
}

pub fn streets_for(encoder: EncoderRole) -> &'static StreetSet {
    &TERRITORY_TABLE.buckets[encoder.index()]
}

/// Every known street, encoder 1 first.
pub fn all_streets() -> impl Iterator<Item = &'static str> {
    TERRITORY_TABLE
        .buckets
        .iter()
        .flat_map(|bucket| bucket.iter().copied())
}
