//! Embedded teaching datasets

use crate::table::{Record, Table};

pub const GOLF_TARGET: &str = "PlayGolf";
pub const GOLF_FEATURES: &[&str] = &["Outlook", "Temperature", "Humidity", "Windy"];

const GOLF_OUTLOOK: &[&str] = &[
    "Sunny", "Sunny", "Overcast", "Rainy", "Rainy", "Rainy", "Overcast", "Sunny", "Sunny",
    "Rainy", "Sunny", "Overcast", "Overcast", "Rainy",
];
const GOLF_TEMPERATURE: &[&str] = &[
    "Hot", "Hot", "Hot", "Mild", "Cool", "Cool", "Cool", "Mild", "Cool", "Mild", "Mild", "Mild",
    "Hot", "Mild",
];
const GOLF_HUMIDITY: &[&str] = &[
    "High", "High", "High", "High", "Normal", "Normal", "Normal", "High", "Normal", "Normal",
    "Normal", "High", "Normal", "High",
];
const GOLF_WINDY: &[&str] = &[
    "False", "False", "True", "False", "False", "True", "True", "False", "False", "False", "True",
    "True", "False", "True",
];
const GOLF_PLAY: &[&str] = &[
    "No", "No", "Yes", "Yes", "Yes", "No", "Yes", "No", "Yes", "Yes", "Yes", "Yes", "Yes", "No",
];

/// The 14-row "play golf" weather table.
pub fn golf_table() -> Table {
    table_from_literals(&[
        ("Outlook", GOLF_OUTLOOK),
        ("Temperature", GOLF_TEMPERATURE),
        ("Humidity", GOLF_HUMIDITY),
        ("Windy", GOLF_WINDY),
        (GOLF_TARGET, GOLF_PLAY),
    ])
}

pub const NAIVE_BAYES_TARGET: &str = "Beli";
pub const NAIVE_BAYES_FEATURES: &[&str] = &["Penghasilan", "Pekerjaan", "Promo"];

const NB_PENGHASILAN: &[&str] = &[
    "Tinggi", "Sedang", "Rendah", "Tinggi", "Sedang", "Rendah", "Tinggi", "Sedang", "Rendah",
    "Tinggi",
];
const NB_PEKERJAAN: &[&str] = &[
    "PNS", "Swasta", "Mahasiswa", "Swasta", "PNS", "PNS", "Mahasiswa", "Swasta", "Swasta",
    "Swasta",
];
const NB_PROMO: &[&str] = &[
    "Ada", "Tidak", "Ada", "Ada", "Tidak", "Ada", "Tidak", "Ada", "Tidak", "Ada",
];
const NB_BELI: &[&str] = &[
    "Ya", "Tidak", "Ya", "Ya", "Tidak", "Ya", "Tidak", "Ya", "Tidak", "Ya",
];

/// Purchase-decision table used as the Naive Bayes classroom example.
pub fn naive_bayes_table() -> Table {
    table_from_literals(&[
        ("Penghasilan", NB_PENGHASILAN),
        ("Pekerjaan", NB_PEKERJAAN),
        ("Promo", NB_PROMO),
        (NAIVE_BAYES_TARGET, NB_BELI),
    ])
}

/// Test case shown with [`naive_bayes_table`].
pub fn naive_bayes_default_test() -> Record {
    [("Penghasilan", "Sedang"), ("Pekerjaan", "PNS"), ("Promo", "Ada")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn table_from_literals(columns: &[(&str, &[&str])]) -> Table {
    match Table::from_columns(columns) {
        Ok(table) => table,
        // Literal columns above all have the same height.
        Err(err) => unreachable!("embedded dataset is malformed: {err}"),
    }
}
