// ============================================================
// Layer 5 — Regression Models
// ============================================================
// Pre-trained models are exported to JSON and evaluated here.
// Three shapes are supported, distinguished by "kind":
//
//   linear         intercept + Σ coef · feature
//   tree_ensemble  base_score + Σ leaf value of each tree
//   constant       fixed value (also used as the fallback)
//
// Features are referenced by column name, so the order inside
// an artifact does not need to match FEATURE_COLUMNS. Names are
// resolved to column indices once, in validate().

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::feature::{index_of, FeatureVector};
use crate::domain::traits::Regressor;

// ─── Linear ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients:  Vec<f64>,
    pub intercept:     f64,

    #[serde(skip)]
    indices: Vec<usize>,
}

impl LinearModel {
    pub fn new(feature_names: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let mut model = Self { feature_names, coefficients, intercept, indices: Vec::new() };
        model.validate()?;
        Ok(model)
    }

    fn validate(&mut self) -> Result<()> {
        if self.feature_names.len() != self.coefficients.len() {
            bail!(
                "Linear model has {} feature names but {} coefficients",
                self.feature_names.len(),
                self.coefficients.len()
            );
        }
        self.indices = self
            .feature_names
            .iter()
            .map(|name| resolve(name))
            .collect::<Result<_>>()?;
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if self.indices.len() != self.coefficients.len() {
            bail!("Linear model used before validation");
        }
        let dot: f64 = self
            .indices
            .iter()
            .zip(&self.coefficients)
            .map(|(i, c)| features.at(*i) * c)
            .sum();
        Ok(self.intercept + dot)
    }

    fn describe(&self) -> String {
        format!("linear({})", self.coefficients.len())
    }
}

// ─── Tree ensemble ────────────────────────────────────────────────────────────
/// One node of a regression tree, stored in a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when the feature is strictly below `threshold`
    Split {
        feature:   String,
        threshold: f64,
        left:      usize,
        right:     usize,
        #[serde(skip)]
        index:     usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&mut self) -> Result<()> {
        if self.nodes.is_empty() {
            bail!("Tree has no nodes");
        }
        let n = self.nodes.len();
        for (pos, node) in self.nodes.iter_mut().enumerate() {
            if let TreeNode::Split { feature, left, right, index, .. } = node {
                // Children strictly after the parent keeps every walk finite
                for child in [*left, *right] {
                    if child <= pos || child >= n {
                        bail!("Node {pos} points to invalid child {child} (tree has {n} nodes)");
                    }
                }
                *index = resolve(feature)?;
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &FeatureVector) -> f64 {
        let mut pos = 0;
        loop {
            match &self.nodes[pos] {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split { threshold, left, right, index, .. } => {
                    pos = if features.at(*index) < *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees:      Vec<RegressionTree>,

    #[serde(skip)]
    validated: bool,
}

impl TreeEnsemble {
    fn validate(&mut self) -> Result<()> {
        if self.trees.is_empty() {
            bail!("Tree ensemble has no trees");
        }
        for (i, tree) in self.trees.iter_mut().enumerate() {
            tree.validate().with_context(|| format!("Invalid tree {i}"))?;
        }
        self.validated = true;
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if !self.validated {
            bail!("Tree ensemble used before validation");
        }
        Ok(self.base_score + self.trees.iter().map(|t| t.evaluate(features)).sum::<f64>())
    }

    fn describe(&self) -> String {
        format!("tree_ensemble({} trees)", self.trees.len())
    }
}

// ─── Constant ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantModel {
    pub value: f64,
}

impl ConstantModel {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Regressor for ConstantModel {
    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(self.value)
    }

    fn describe(&self) -> String {
        format!("constant({})", self.value)
    }
}

// ─── Artifact wrapper ─────────────────────────────────────────────────────────
/// A model as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
    Constant(ConstantModel),
}

impl RegressionModel {
    /// Parse and validate a model artifact.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut model: RegressionModel =
            serde_json::from_str(json).context("Malformed model artifact")?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&mut self) -> Result<()> {
        match self {
            RegressionModel::Linear(m)       => m.validate(),
            RegressionModel::TreeEnsemble(m) => m.validate(),
            RegressionModel::Constant(_)     => Ok(()),
        }
    }
}

impl Regressor for RegressionModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        match self {
            RegressionModel::Linear(m)       => m.predict(features),
            RegressionModel::TreeEnsemble(m) => m.predict(features),
            RegressionModel::Constant(m)     => m.predict(features),
        }
    }

    fn describe(&self) -> String {
        match self {
            RegressionModel::Linear(m)       => m.describe(),
            RegressionModel::TreeEnsemble(m) => m.describe(),
            RegressionModel::Constant(m)     => m.describe(),
        }
    }
}

fn resolve(name: &str) -> Result<usize> {
    index_of(name).with_context(|| format!("Model references unknown feature '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(age: f64, income: f64) -> FeatureVector {
        let mut v = FeatureVector::zeros();
        v.set("age", age).unwrap();
        v.set("income_lakhs", income).unwrap();
        v
    }

    #[test]
    fn test_linear_prediction() {
        let json = r#"{
            "kind": "linear",
            "feature_names": ["income_lakhs", "age"],
            "coefficients": [10.0, 2.0],
            "intercept": 100.0
        }"#;
        let m = RegressionModel::from_json(json).unwrap();
        let y = m.predict(&vector(30.0, 5.0)).unwrap();
        assert_eq!(y, 100.0 + 50.0 + 60.0);
        assert_eq!(m.describe(), "linear(2)");
    }

    #[test]
    fn test_linear_rejects_length_mismatch() {
        let json = r#"{"kind": "linear", "feature_names": ["age"], "coefficients": [], "intercept": 0}"#;
        assert!(RegressionModel::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_feature() {
        let r = LinearModel::new(vec!["income_level".into()], vec![1.0], 0.0);
        assert!(r.is_err());
    }

    #[test]
    fn test_unvalidated_linear_model_refuses_to_predict() {
        let m: LinearModel = serde_json::from_str(
            r#"{"feature_names": ["age"], "coefficients": [1.0], "intercept": 0}"#,
        )
        .unwrap();
        assert!(m.predict(&vector(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_tree_ensemble_prediction() {
        let json = r#"{
            "kind": "tree_ensemble",
            "base_score": 1000.0,
            "trees": [
                {"nodes": [
                    {"feature": "age", "threshold": 40.0, "left": 1, "right": 2},
                    {"leaf": 100.0},
                    {"leaf": 300.0}
                ]},
                {"nodes": [{"leaf": -50.0}]}
            ]
        }"#;
        let m = RegressionModel::from_json(json).unwrap();
        assert_eq!(m.predict(&vector(39.0, 0.0)).unwrap(), 1050.0);
        // threshold itself goes right
        assert_eq!(m.predict(&vector(40.0, 0.0)).unwrap(), 1250.0);
    }

    #[test]
    fn test_tree_rejects_backward_child() {
        let json = r#"{
            "kind": "tree_ensemble",
            "trees": [{"nodes": [
                {"feature": "age", "threshold": 1.0, "left": 0, "right": 1},
                {"leaf": 1.0}
            ]}]
        }"#;
        assert!(RegressionModel::from_json(json).is_err());
    }

    #[test]
    fn test_tree_rejects_out_of_range_child() {
        let json = r#"{
            "kind": "tree_ensemble",
            "trees": [{"nodes": [
                {"feature": "age", "threshold": 1.0, "left": 1, "right": 5},
                {"leaf": 1.0}
            ]}]
        }"#;
        assert!(RegressionModel::from_json(json).is_err());
    }

    #[test]
    fn test_empty_ensemble_is_rejected() {
        assert!(RegressionModel::from_json(r#"{"kind": "tree_ensemble", "trees": []}"#).is_err());
    }

    #[test]
    fn test_constant_model() {
        let m = RegressionModel::from_json(r#"{"kind": "constant", "value": 1234.5}"#).unwrap();
        assert_eq!(m.predict(&FeatureVector::zeros()).unwrap(), 1234.5);
    }
}
