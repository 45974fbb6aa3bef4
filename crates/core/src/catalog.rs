//! Word catalog - themed vocabulary per category

use crate::rng::RandomSource;
use crate::types::Category;

const ANIMALS: &[&str] = &[
    "PERRO", "GATO", "LEON", "TIGRE", "ELEFANTE", "JIRAFA", "MONO", "OSO", "LOBO", "ZORRO",
    "CABALLO", "VACA", "CERDO", "OVEJA", "CONEJO",
];

const COUNTRIES: &[&str] = &[
    "FRANCIA", "ESPAÑA", "BRASIL", "JAPON", "ITALIA", "MEXICO", "CANADA", "CHINA", "RUSIA",
    "INDIA", "ALEMANIA", "PERU", "CHILE", "COLOMBIA", "ARGENTINA",
];

const SCIENCE: &[&str] = &[
    "ATOMO", "CELULA", "ENERGIA", "MOLECULA", "PROTON", "ELECTRON", "NEUTRON", "GRAVEDAD",
    "OXIGENO", "CARBONO", "HIDROGENO", "CALCIO", "HIERRO", "PLATA", "ORO",
];

const SPORTS: &[&str] = &[
    "FUTBOL", "TENIS", "NATACION", "ATLETISMO", "CICLISMO", "BOXEO", "GOLF", "RUGBY", "HOCKEY",
    "KARATE", "JUDO", "ESGRIMA", "POLO", "SURF", "ESQUI",
];

/// Every candidate word for a category (uppercase)
pub fn words(category: Category) -> &'static [&'static str] {
    match category {
        Category::Animals => ANIMALS,
        Category::Countries => COUNTRIES,
        Category::Science => SCIENCE,
        Category::Sports => SPORTS,
    }
}

/// Words of one category not drawn yet
///
/// Draws remove a uniformly random entry, so a pool never hands out the
/// same word twice.
#[derive(Debug, Clone)]
pub struct WordPool {
    remaining: Vec<&'static str>,
}

impl WordPool {
    pub fn new(category: Category) -> Self {
        Self {
            remaining: words(category).to_vec(),
        }
    }

    /// Remove and return a random word; `None` once the pool is empty
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> Option<&'static str> {
        if self.remaining.is_empty() {
            return None;
        }
        let i = rng.next_index(self.remaining.len());
        Some(self.remaining.remove(i))
    }

    /// Draw up to `count` words
    pub fn take<R: RandomSource>(&mut self, count: usize, rng: &mut R) -> Vec<String> {
        let mut picked = Vec::with_capacity(count.min(self.remaining.len()));
        while picked.len() < count {
            let Some(word) = self.draw(rng) else {
                break;
            };
            picked.push(word.to_string());
        }
        picked
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Draw `count` distinct words without replacement.
///
/// Returns fewer than `count` when the category runs out.
pub fn select_words<R: RandomSource>(category: Category, count: usize, rng: &mut R) -> Vec<String> {
    WordPool::new(category).take(count, rng)
}
