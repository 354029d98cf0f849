//! Shared test data.

use crate::catalog::Catalog;
use crate::locale::TitleTable;
use crate::provider::RegionRecord;

/// One continent, one subregion, France and Germany.
pub fn europe_records() -> Vec<RegionRecord> {
    vec![
        RegionRecord::continent("001", &["150"]),
        RegionRecord::continent("150", &["155"]),
        RegionRecord::within("155", "150", &["FR", "DE"]),
        RegionRecord::within("FR", "150", &[]),
        RegionRecord::within("DE", "150", &[]),
    ]
}

/// Three continents, five subregions, sixteen countries.
///
/// `ZZ` has no title in any fixture locale.
pub fn sample_records() -> Vec<RegionRecord> {
    let mut records = vec![
        RegionRecord::continent("001", &["150", "002", "019"]),
        RegionRecord::continent("150", &["154", "155"]),
        RegionRecord::continent("002", &["015"]),
        RegionRecord::continent("019", &["021", "005"]),
        RegionRecord::within("154", "150", &["AX", "SE", "DK", "ZZ"]),
        RegionRecord::within("155", "150", &["FR", "DE", "BE", "AT"]),
        RegionRecord::within("015", "002", &["EG", "MA", "DZ"]),
        RegionRecord::within("021", "019", &["US", "CA"]),
        RegionRecord::within("005", "019", &["BR", "AR", "PE"]),
    ];
    for (continent, countries) in [
        ("150", &["AX", "SE", "DK", "ZZ", "FR", "DE", "BE", "AT"][..]),
        ("002", &["EG", "MA", "DZ"][..]),
        ("019", &["US", "CA", "BR", "AR", "PE"][..]),
    ] {
        for country in countries {
            records.push(RegionRecord::within(*country, continent, &[]));
        }
    }
    records
}

pub fn europe_catalog() -> Catalog {
    Catalog::from_records(&europe_records())
}

pub fn sample_catalog() -> Catalog {
    Catalog::from_records(&sample_records())
}

pub fn en_titles() -> TitleTable {
    [
        ("150", "Europe"),
        ("002", "Africa"),
        ("019", "Americas"),
        ("154", "Northern Europe"),
        ("155", "Western Europe"),
        ("015", "Northern Africa"),
        ("021", "Northern America"),
        ("005", "South America"),
        ("AX", "Åland Islands"),
        ("SE", "Sweden"),
        ("DK", "Denmark"),
        ("FR", "France"),
        ("DE", "Germany"),
        ("BE", "Belgium"),
        ("AT", "Austria"),
        ("EG", "Egypt"),
        ("MA", "Morocco"),
        ("DZ", "Algeria"),
        ("US", "United States"),
        ("CA", "Canada"),
        ("BR", "Brazil"),
        ("AR", "Argentina"),
        ("PE", "Peru"),
    ]
    .into_iter()
    .fold(TitleTable::new("en"), |table, (code, title)| {
        table.with_title(code, title)
    })
}

/// German titles, so that DE sorts under "D" and FR under "F".
pub fn de_titles() -> TitleTable {
    TitleTable::new("de")
        .with_title("150", "Europa")
        .with_title("155", "Westeuropa")
        .with_title("FR", "Frankreich")
        .with_title("DE", "Deutschland")
}

pub fn fr_titles() -> TitleTable {
    [
        ("150", "Europe"),
        ("002", "Afrique"),
        ("019", "Amériques"),
        ("154", "Europe du Nord"),
        ("155", "Europe de l’Ouest"),
        ("015", "Afrique du Nord"),
        ("021", "Amérique du Nord"),
        ("005", "Amérique du Sud"),
        ("AX", "Îles Åland"),
        ("SE", "Suède"),
        ("DK", "Danemark"),
        ("FR", "France"),
        ("DE", "Allemagne"),
        ("BE", "Belgique"),
        ("AT", "Autriche"),
        ("EG", "Égypte"),
        ("MA", "Maroc"),
        ("DZ", "Algérie"),
        ("US", "États-Unis"),
        ("CA", "Canada"),
        ("BR", "Brésil"),
        ("AR", "Argentine"),
        ("PE", "Pérou"),
    ]
    .into_iter()
    .fold(TitleTable::new("fr"), |table, (code, title)| {
        table.with_title(code, title)
    })
}
