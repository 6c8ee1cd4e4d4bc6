use crate::LinkGraph;
use std::collections::{BTreeMap, BTreeSet};

pub fn corpus(links: &[(&str, &[&str])]) -> LinkGraph {
    let links: BTreeMap<String, BTreeSet<String>> = links
        .iter()
        .map(|(page, outs)| {
            let outs = outs.iter().map(|s| (*s).to_owned()).collect();
            ((*page).to_owned(), outs)
        })
        .collect();
    LinkGraph::from_links(&links).unwrap()
}

// Fixed point of {a -> b, b -> c, c -> a b} with jump term j = (1 - d) / 3:
//   a = j + d c/2
//   b = j + d a + d c/2
//   c = j + d b
// solved by substitution.
pub fn abc_reference(damping: f64) -> (f64, f64, f64) {
    let d = damping;
    let j = (1.0 - d) / 3.0;
    let c = j * (1.0 + d + d * d) / (1.0 - d * d * (d + 1.0) / 2.0);
    let b = (c - j) / d;
    let a = j + d * c / 2.0;
    (a, b, c)
}

#[derive(Debug, Clone)]
pub struct RandomCorpus {
    pub links: BTreeMap<String, BTreeSet<String>>,
}

impl RandomCorpus {
    pub fn build(&self) -> LinkGraph {
        LinkGraph::from_links(&self.links).unwrap()
    }
}

impl quickcheck::Arbitrary for RandomCorpus {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        const N: usize = 8;

        let n = usize::arbitrary(g) % N + 1;
        let names: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
        let mut links: BTreeMap<String, BTreeSet<String>> = names
            .iter()
            .map(|page| (page.clone(), BTreeSet::new()))
            .collect();
        for _ in 0..(n * 2) {
            let u = &names[usize::arbitrary(g) % n];
            let v = &names[usize::arbitrary(g) % n];
            if u != v {
                links.get_mut(u).unwrap().insert(v.clone());
            }
        }
        Self { links }
    }
}
