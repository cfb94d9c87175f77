use crate::perceptron::{Example, Label};

use super::Dataset;

pub const SAMPLE_NAME: &str = "Sample Dataset";
pub const SAMPLE_COLLECTION: &str = "Sample Dataset Cases";

const ROWS: [(&str, f64, f64, f64, &str); 9] = [
    (
        "RA",
        0.0,
        2.0,
        -1.0,
        "You know the pizza place is bad when even the breadsticks are bad.",
    ),
    (
        "RB",
        0.0,
        1.0,
        -1.0,
        "I had a bad experience at Mama’s pizza when I ordered pepperoni but they delivered pineapple",
    ),
    (
        "RC",
        2.0,
        0.0,
        1.0,
        "I had the best birthday ever since I got to eat the best pizza from Mama’s.",
    ),
    (
        "RD",
        1.0,
        1.0,
        -1.0,
        "Even though this is in the best location, the management is simply bad.",
    ),
    (
        "RE",
        1.0,
        0.0,
        1.0,
        "Mama’s has the best pizza in Pittsburg, if not the entire country.",
    ),
    (
        "RF",
        2.0,
        1.0,
        1.0,
        "Whenever I am having a bad day, I come to the best place, Mama’s, because the pizza and vibe is simply the best.",
    ),
    ("RG", 0.0, 0.0, 1.0, "I love eating at Mama’s pizza place!"),
    (
        "RH",
        1.0,
        2.0,
        -1.0,
        "With the bad smell and the bad flavors, I would challenge anyone to consider this place to be good, let alone the best.",
    ),
    (
        "RI",
        2.0,
        2.0,
        -1.0,
        "If you want the best, definitely don’t come here! The pizza is bad, the location is bad, and the idea that this is the best pizza place is truly laughable.",
    ),
];

/// Nine pizza reviews scored by counts of "best" (feat1) and "bad" (feat2).
pub fn sample_dataset() -> Dataset {
    Dataset {
        name: SAMPLE_NAME.to_string(),
        collection: Some(SAMPLE_COLLECTION.to_string()),
        examples: ROWS
            .iter()
            .map(|&(id, feat1, feat2, label, text)| {
                Example::new(id, feat1, feat2, Label::from_raw(label)).with_text(text)
            })
            .collect(),
    }
}
