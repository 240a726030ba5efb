// ═══════════════════════════════════════════════════════════════════════
// Static map data — the classic 42-territory board
// Territory names, continents and adjacency never change during a game.
// Games work on owned copies produced by `catalog()`.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Continent, Owner, Territory, TerritoryId};

/// Static description of a territory (compile-time constant).
#[derive(Debug, Clone)]
pub struct TerritoryDef {
    pub id: TerritoryId,
    pub key: &'static str,
    pub name: &'static str,
    pub continent: Continent,
    pub adjacent: &'static [TerritoryId],
}

impl TerritoryDef {
    /// Fresh dynamic territory with no owner and no armies.
    pub fn instantiate(&self) -> Territory {
        Territory {
            id: self.id,
            key: self.key.to_string(),
            name: self.name.to_string(),
            continent: self.continent,
            owner: Owner::Unset,
            armies: 0,
            adjacent: self.adjacent.to_vec(),
        }
    }
}

// ── Territory ID constants ─────────────────────────────────────────────

// North America
pub const ALASKA: TerritoryId              = TerritoryId(0);
pub const NORTHWEST_TERRITORY: TerritoryId = TerritoryId(1);
pub const GREENLAND: TerritoryId           = TerritoryId(2);
pub const ALBERTA: TerritoryId             = TerritoryId(3);
pub const ONTARIO: TerritoryId             = TerritoryId(4);
pub const QUEBEC: TerritoryId              = TerritoryId(5);
pub const WESTERN_US: TerritoryId          = TerritoryId(6);
pub const EASTERN_US: TerritoryId          = TerritoryId(7);
pub const CENTRAL_AMERICA: TerritoryId     = TerritoryId(8);
// South America
pub const VENEZUELA: TerritoryId           = TerritoryId(9);
pub const PERU: TerritoryId                = TerritoryId(10);
pub const BRAZIL: TerritoryId              = TerritoryId(11);
pub const ARGENTINA: TerritoryId           = TerritoryId(12);
// Europe
pub const ICELAND: TerritoryId             = TerritoryId(13);
pub const SCANDINAVIA: TerritoryId         = TerritoryId(14);
pub const GREAT_BRITAIN: TerritoryId       = TerritoryId(15);
pub const NORTHERN_EUROPE: TerritoryId     = TerritoryId(16);
pub const UKRAINE: TerritoryId             = TerritoryId(17);
pub const WESTERN_EUROPE: TerritoryId      = TerritoryId(18);
pub const SOUTHERN_EUROPE: TerritoryId     = TerritoryId(19);
// Africa
pub const NORTH_AFRICA: TerritoryId        = TerritoryId(20);
pub const EGYPT: TerritoryId               = TerritoryId(21);
pub const EAST_AFRICA: TerritoryId         = TerritoryId(22);
pub const CONGO: TerritoryId               = TerritoryId(23);
pub const SOUTH_AFRICA: TerritoryId        = TerritoryId(24);
pub const MADAGASCAR: TerritoryId          = TerritoryId(25);
// Asia
pub const URAL: TerritoryId                = TerritoryId(26);
pub const SIBERIA: TerritoryId             = TerritoryId(27);
pub const YAKUTSK: TerritoryId             = TerritoryId(28);
pub const KAMCHATKA: TerritoryId           = TerritoryId(29);
pub const IRKUTSK: TerritoryId             = TerritoryId(30);
pub const MONGOLIA: TerritoryId            = TerritoryId(31);
pub const JAPAN: TerritoryId               = TerritoryId(32);
pub const AFGHANISTAN: TerritoryId         = TerritoryId(33);
pub const CHINA: TerritoryId               = TerritoryId(34);
pub const MIDDLE_EAST: TerritoryId         = TerritoryId(35);
pub const INDIA: TerritoryId               = TerritoryId(36);
pub const SIAM: TerritoryId                = TerritoryId(37);
// Australia
pub const INDONESIA: TerritoryId           = TerritoryId(38);
pub const NEW_GUINEA: TerritoryId          = TerritoryId(39);
pub const WESTERN_AUSTRALIA: TerritoryId   = TerritoryId(40);
pub const EASTERN_AUSTRALIA: TerritoryId   = TerritoryId(41);

pub const NUM_TERRITORIES: usize = 42;

/// Lookup territory name by TerritoryId.
pub fn territory_name(id: TerritoryId) -> &'static str {
    TERRITORIES.get(id.index()).map_or("<unknown>", |t| t.name)
}

/// Resolve a slug such as `"north-africa"`.
pub fn find(key: &str) -> Option<TerritoryId> {
    TERRITORIES.iter().find(|t| t.key == key).map(|t| t.id)
}

/// Deep copy of the whole board for a new game.
pub fn catalog() -> Vec<Territory> {
    TERRITORIES.iter().map(TerritoryDef::instantiate).collect()
}

/// Territories belonging to a continent, in catalog order.
pub fn continent_members(continent: Continent) -> impl Iterator<Item = TerritoryId> {
    TERRITORIES.iter().filter(move |t| t.continent == continent).map(|t| t.id)
}

// ── Static territory definitions ───────────────────────────────────────

macro_rules! territory {
    ($name:expr, $key:expr, $id:expr, $continent:ident, adj: [$($a:expr),*]) => {
        TerritoryDef {
            id: $id, key: $key, name: $name, continent: Continent::$continent,
            adjacent: &[$($a),*],
        }
    };
}

pub static TERRITORIES: [TerritoryDef; NUM_TERRITORIES] = [
    // ═══ NORTH AMERICA ═══
    territory!("Alaska", "alaska", ALASKA, NorthAmerica,
        adj: [NORTHWEST_TERRITORY, ALBERTA, KAMCHATKA]),
    territory!("Northwest Territory", "northwest-territory", NORTHWEST_TERRITORY, NorthAmerica,
        adj: [ALASKA, ALBERTA, ONTARIO, GREENLAND]),
    territory!("Greenland", "greenland", GREENLAND, NorthAmerica,
        adj: [NORTHWEST_TERRITORY, ONTARIO, QUEBEC, ICELAND]),
    territory!("Alberta", "alberta", ALBERTA, NorthAmerica,
        adj: [ALASKA, NORTHWEST_TERRITORY, ONTARIO, WESTERN_US]),
    territory!("Ontario", "ontario", ONTARIO, NorthAmerica,
        adj: [NORTHWEST_TERRITORY, ALBERTA, WESTERN_US, EASTERN_US, QUEBEC, GREENLAND]),
    territory!("Quebec", "quebec", QUEBEC, NorthAmerica,
        adj: [ONTARIO, EASTERN_US, GREENLAND]),
    territory!("Western United States", "western-us", WESTERN_US, NorthAmerica,
        adj: [ALBERTA, ONTARIO, EASTERN_US, CENTRAL_AMERICA]),
    territory!("Eastern United States", "eastern-us", EASTERN_US, NorthAmerica,
        adj: [WESTERN_US, ONTARIO, QUEBEC, CENTRAL_AMERICA]),
    territory!("Central America", "central-america", CENTRAL_AMERICA, NorthAmerica,
        adj: [WESTERN_US, EASTERN_US, VENEZUELA]),

    // ═══ SOUTH AMERICA ═══
    territory!("Venezuela", "venezuela", VENEZUELA, SouthAmerica,
        adj: [CENTRAL_AMERICA, PERU, BRAZIL]),
    territory!("Peru", "peru", PERU, SouthAmerica,
        adj: [VENEZUELA, BRAZIL, ARGENTINA]),
    territory!("Brazil", "brazil", BRAZIL, SouthAmerica,
        adj: [VENEZUELA, PERU, ARGENTINA, NORTH_AFRICA]),
    territory!("Argentina", "argentina", ARGENTINA, SouthAmerica,
        adj: [PERU, BRAZIL]),

    // ═══ EUROPE ═══
    territory!("Iceland", "iceland", ICELAND, Europe,
        adj: [GREENLAND, GREAT_BRITAIN, SCANDINAVIA]),
    territory!("Scandinavia", "scandinavia", SCANDINAVIA, Europe,
        adj: [ICELAND, GREAT_BRITAIN, NORTHERN_EUROPE, UKRAINE]),
    territory!("Great Britain", "great-britain", GREAT_BRITAIN, Europe,
        adj: [ICELAND, SCANDINAVIA, NORTHERN_EUROPE, WESTERN_EUROPE]),
    territory!("Northern Europe", "northern-europe", NORTHERN_EUROPE, Europe,
        adj: [GREAT_BRITAIN, SCANDINAVIA, UKRAINE, SOUTHERN_EUROPE, WESTERN_EUROPE]),
    territory!("Ukraine", "ukraine", UKRAINE, Europe,
        adj: [SCANDINAVIA, NORTHERN_EUROPE, SOUTHERN_EUROPE, MIDDLE_EAST, AFGHANISTAN, URAL]),
    territory!("Western Europe", "western-europe", WESTERN_EUROPE, Europe,
        adj: [GREAT_BRITAIN, NORTHERN_EUROPE, SOUTHERN_EUROPE, NORTH_AFRICA]),
    territory!("Southern Europe", "southern-europe", SOUTHERN_EUROPE, Europe,
        adj: [WESTERN_EUROPE, NORTHERN_EUROPE, UKRAINE, MIDDLE_EAST, EGYPT, NORTH_AFRICA]),

    // ═══ AFRICA ═══
    territory!("North Africa", "north-africa", NORTH_AFRICA, Africa,
        adj: [BRAZIL, WESTERN_EUROPE, SOUTHERN_EUROPE, EGYPT, EAST_AFRICA, CONGO]),
    territory!("Egypt", "egypt", EGYPT, Africa,
        adj: [NORTH_AFRICA, SOUTHERN_EUROPE, MIDDLE_EAST, EAST_AFRICA]),
    territory!("East Africa", "east-africa", EAST_AFRICA, Africa,
        adj: [EGYPT, NORTH_AFRICA, CONGO, SOUTH_AFRICA, MADAGASCAR, MIDDLE_EAST]),
    territory!("Congo", "congo", CONGO, Africa,
        adj: [NORTH_AFRICA, EAST_AFRICA, SOUTH_AFRICA]),
    territory!("South Africa", "south-africa", SOUTH_AFRICA, Africa,
        adj: [CONGO, EAST_AFRICA, MADAGASCAR]),
    territory!("Madagascar", "madagascar", MADAGASCAR, Africa,
        adj: [SOUTH_AFRICA, EAST_AFRICA]),

    // ═══ ASIA ═══
    territory!("Ural", "ural", URAL, Asia,
        adj: [UKRAINE, SIBERIA, CHINA, AFGHANISTAN]),
    territory!("Siberia", "siberia", SIBERIA, Asia,
        adj: [URAL, YAKUTSK, IRKUTSK, MONGOLIA, CHINA]),
    territory!("Yakutsk", "yakutsk", YAKUTSK, Asia,
        adj: [SIBERIA, KAMCHATKA, IRKUTSK]),
    territory!("Kamchatka", "kamchatka", KAMCHATKA, Asia,
        adj: [YAKUTSK, IRKUTSK, MONGOLIA, JAPAN, ALASKA]),
    territory!("Irkutsk", "irkutsk", IRKUTSK, Asia,
        adj: [SIBERIA, YAKUTSK, KAMCHATKA, MONGOLIA]),
    territory!("Mongolia", "mongolia", MONGOLIA, Asia,
        adj: [IRKUTSK, SIBERIA, CHINA, JAPAN, KAMCHATKA]),
    territory!("Japan", "japan", JAPAN, Asia,
        adj: [KAMCHATKA, MONGOLIA]),
    territory!("Afghanistan", "afghanistan", AFGHANISTAN, Asia,
        adj: [UKRAINE, URAL, CHINA, INDIA, MIDDLE_EAST]),
    territory!("China", "china", CHINA, Asia,
        adj: [AFGHANISTAN, URAL, SIBERIA, MONGOLIA, SIAM, INDIA]),
    territory!("Middle East", "middle-east", MIDDLE_EAST, Asia,
        adj: [UKRAINE, SOUTHERN_EUROPE, EGYPT, EAST_AFRICA, INDIA, AFGHANISTAN]),
    territory!("India", "india", INDIA, Asia,
        adj: [MIDDLE_EAST, AFGHANISTAN, CHINA, SIAM]),
    territory!("Siam", "siam", SIAM, Asia,
        adj: [INDIA, CHINA, INDONESIA]),

    // ═══ AUSTRALIA ═══
    territory!("Indonesia", "indonesia", INDONESIA, Australia,
        adj: [SIAM, NEW_GUINEA, WESTERN_AUSTRALIA]),
    territory!("New Guinea", "new-guinea", NEW_GUINEA, Australia,
        adj: [INDONESIA, EASTERN_AUSTRALIA, WESTERN_AUSTRALIA]),
    territory!("Western Australia", "western-australia", WESTERN_AUSTRALIA, Australia,
        adj: [INDONESIA, NEW_GUINEA, EASTERN_AUSTRALIA]),
    territory!("Eastern Australia", "eastern-australia", EASTERN_AUSTRALIA, Australia,
        adj: [NEW_GUINEA, WESTERN_AUSTRALIA]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_positions() {
        for (i, def) in TERRITORIES.iter().enumerate() {
            assert_eq!(def.id.index(), i, "{} is out of place", def.name);
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for def in TERRITORIES.iter() {
            for adj in def.adjacent {
                let other = &TERRITORIES[adj.index()];
                assert!(
                    other.adjacent.contains(&def.id),
                    "{} lists {} but not the other way round",
                    def.name, other.name
                );
            }
        }
    }

    #[test]
    fn test_no_self_adjacency() {
        for def in TERRITORIES.iter() {
            assert!(!def.adjacent.contains(&def.id), "{} is adjacent to itself", def.name);
        }
    }

    #[test]
    fn test_continent_sizes() {
        let sizes: Vec<usize> = Continent::ALL.iter()
            .map(|&c| continent_members(c).count())
            .collect();
        assert_eq!(sizes, vec![9, 4, 7, 6, 12, 4]);
    }

    #[test]
    fn test_find_by_key() {
        assert_eq!(find("north-africa"), Some(NORTH_AFRICA));
        assert_eq!(find("eastern-australia"), Some(EASTERN_AUSTRALIA));
        assert_eq!(find("atlantis"), None);
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = TERRITORIES.iter().map(|t| t.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), NUM_TERRITORIES);
    }

    #[test]
    fn test_catalog_is_a_fresh_copy() {
        let mut a = catalog();
        a[0].armies = 99;
        a[0].adjacent.clear();
        let b = catalog();
        assert_eq!(b[0].armies, 0);
        assert_eq!(b[0].adjacent.len(), TERRITORIES[0].adjacent.len());
        assert_eq!(b[0].owner, Owner::Unset);
    }

    #[test]
    fn test_board_is_connected() {
        let mut seen = vec![false; NUM_TERRITORIES];
        let mut stack = vec![ALASKA];
        while let Some(t) = stack.pop() {
            if std::mem::replace(&mut seen[t.index()], true) {
                continue;
            }
            stack.extend(TERRITORIES[t.index()].adjacent.iter().copied());
        }
        assert!(seen.iter().all(|&s| s));
    }
}
