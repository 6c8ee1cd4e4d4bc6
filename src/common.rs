use std::{collections::HashMap, hash::Hash};

pub fn norm_1<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().fold(0.0, |acc, x| acc.max(x.abs()))
}
