use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use strum::EnumCount;

use super::super::catalog::ChartType;


/// One score per chart archetype, indexed by [`ChartType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreMap([f64; ChartType::COUNT]);

impl ScoreMap {
    pub fn zeros() -> Self {
        Self([0.0; ChartType::COUNT])
    }

    pub fn from_fn(mut f: impl FnMut(ChartType) -> f64) -> Self {
        let mut scores = Self::zeros();
        for chart in ChartType::all() {
            scores[chart] = f(chart);
        }
        scores
    }

    /// Adds `amount` to the chart's score.
    pub fn boost(&mut self, chart: ChartType, amount: f64) {
        self[chart] += amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartType, f64)> + '_ {
        ChartType::all().map(move |chart| (chart, self[chart]))
    }

    /// Charts by descending score. Equal scores keep catalog order.
    pub fn ranked(&self) -> Vec<(ChartType, f64)> {
        let mut ranked: Vec<(ChartType, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

impl Default for ScoreMap {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<ChartType> for ScoreMap {
    type Output = f64;

    fn index(&self, chart: ChartType) -> &f64 {
        &self.0[chart.index()]
    }
}

impl IndexMut<ChartType> for ScoreMap {
    fn index_mut(&mut self, chart: ChartType) -> &mut f64 {
        &mut self.0[chart.index()]
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ChartType::COUNT))?;
        for (chart, score) in self.iter() {
            map.serialize_entry(chart.id(), &score)?;
        }
        map.end()
    }
}
