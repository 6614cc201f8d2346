//! Native random forest backend
//!
//! Reads a JSON export of a fitted scikit-learn random forest (the arrays of
//! each `tree_`) and predicts without any runtime dependency. Each tree
//! votes with its normalized leaf distribution; the forest prediction is the
//! arg-max of the mean, as in `RandomForestClassifier.predict`.

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ArtifactResult, InferenceError};
use super::classifier::{Classifier, ClassifierKind, Scores};

/// Marker sklearn uses for "no child"
const LEAF: i64 = -1;

/// One fitted decision tree, array layout as in `sklearn.tree._tree.Tree`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (counts or fractions)
    pub value: Vec<Vec<f64>>,
}

/// On-disk forest export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestFile {
    pub n_features: usize,
    /// Class codes in `predict_proba` column order; must be `0..n`, the
    /// codes of the target label encoder
    pub classes: Vec<i64>,
    pub trees: Vec<TreeArrays>,
}

#[derive(Debug, Clone)]
struct Node {
    left: usize,
    right: usize,
    feature: usize,
    threshold: f64,
    /// Normalized class distribution, only meaningful on leaves
    proba: Vec<f64>,
    is_leaf: bool,
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_arrays(
        index: usize,
        arrays: &TreeArrays,
        n_features: usize,
        n_classes: usize,
    ) -> ArtifactResult<Self> {
        let n = arrays.children_left.len();
        let name = format!("forest tree {}", index);

        if n == 0 {
            return Err(ArtifactError::malformed(name, "tree has no nodes"));
        }
        if arrays.children_right.len() != n
            || arrays.feature.len() != n
            || arrays.threshold.len() != n
            || arrays.value.len() != n
        {
            return Err(ArtifactError::malformed(name, "node arrays differ in length"));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (l, r) = (arrays.children_left[i], arrays.children_right[i]);
            let is_leaf = l == LEAF && r == LEAF;
            let weights = &arrays.value[i];

            if weights.len() != n_classes {
                return Err(ArtifactError::malformed(
                    name,
                    format!("node {} has {} class weights, expected {}", i, weights.len(), n_classes),
                ));
            }

            let (left, right, feature) = if is_leaf {
                (0, 0, 0)
            } else {
                // Children always come after their parent in sklearn's layout
                let child = |c: i64| -> Option<usize> {
                    usize::try_from(c).ok().filter(|&c| c > i && c < n)
                };
                let (Some(left), Some(right)) = (child(l), child(r)) else {
                    return Err(ArtifactError::malformed(
                        name,
                        format!("node {} has invalid children ({}, {})", i, l, r),
                    ));
                };
                let feature = usize::try_from(arrays.feature[i])
                    .ok()
                    .filter(|&f| f < n_features)
                    .ok_or_else(|| {
                        ArtifactError::malformed(
                            name.clone(),
                            format!("node {} splits on feature {}", i, arrays.feature[i]),
                        )
                    })?;
                (left, right, feature)
            };

            let total: f64 = weights.iter().sum();
            let proba = if total > 0.0 {
                weights.iter().map(|w| w / total).collect()
            } else {
                vec![1.0 / n_classes as f64; n_classes]
            };

            nodes.push(Node {
                left,
                right,
                feature,
                threshold: arrays.threshold[i],
                proba,
                is_leaf,
            });
        }

        Ok(Self { nodes })
    }

    /// Leaf distribution for one row. Terminates because children
    /// always have a larger index than their parent.
    fn leaf_proba(&self, row: ArrayView1<'_, f32>) -> &[f64] {
        let mut i = 0;
        loop {
            let node = &self.nodes[i];
            if node.is_leaf {
                return &node.proba;
            }
            let x = f64::from(row[node.feature]);
            i = if x <= node.threshold { node.left } else { node.right };
        }
    }
}

/// Random forest classifier evaluated natively
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<Tree>,
}

impl ForestClassifier {
    pub fn from_file(file: &ForestFile) -> ArtifactResult<Self> {
        if file.trees.is_empty() {
            return Err(ArtifactError::malformed("forest", "no trees"));
        }
        if file.classes.len() < 2 {
            return Err(ArtifactError::malformed("forest", "fewer than two classes"));
        }
        if file.classes.iter().zip(0i64..).any(|(&c, i)| c != i) {
            return Err(ArtifactError::malformed(
                "forest",
                format!(
                    "classes must be the encoded codes 0..{}, got {:?}",
                    file.classes.len(),
                    file.classes
                ),
            ));
        }
        if file.n_features == 0 {
            return Err(ArtifactError::malformed("forest", "zero features"));
        }

        let trees = file
            .trees
            .iter()
            .enumerate()
            .map(|(i, t)| Tree::from_arrays(i, t, file.n_features, file.classes.len()))
            .collect::<ArtifactResult<Vec<_>>>()?;

        log::debug!(
            "Forest loaded: {} trees, {} features, {} classes",
            trees.len(),
            file.n_features,
            file.classes.len()
        );

        Ok(Self {
            n_features: file.n_features,
            classes: file.classes.clone(),
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn check_width(&self, features: &ArrayView2<'_, f32>) -> Result<(), InferenceError> {
        if features.ncols() != self.n_features {
            return Err(InferenceError::Backend(format!(
                "forest expects {} features, got {}",
                self.n_features,
                features.ncols()
            )));
        }
        Ok(())
    }

    fn argmax(&self, proba: &Array2<f32>) -> Vec<i64> {
        proba
            .outer_iter()
            .map(|row| {
                // First maximum wins on ties, like numpy's argmax
                let mut best = 0;
                for (c, &p) in row.iter().enumerate() {
                    if p > row[best] {
                        best = c;
                    }
                }
                self.classes[best]
            })
            .collect()
    }

    fn mean_proba(&self, features: ArrayView2<'_, f32>) -> Array2<f32> {
        let n_classes = self.classes.len();
        let mut out = Array2::<f32>::zeros((features.nrows(), n_classes));

        for (r, row) in features.outer_iter().enumerate() {
            let mut acc = vec![0.0f64; n_classes];
            for tree in &self.trees {
                for (a, p) in acc.iter_mut().zip(tree.leaf_proba(row)) {
                    *a += p;
                }
            }
            let n = self.trees.len() as f64;
            for (c, a) in acc.into_iter().enumerate() {
                out[[r, c]] = (a / n) as f32;
            }
        }

        out
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError> {
        self.check_width(&features)?;
        Ok(self.argmax(&self.mean_proba(features)))
    }

    fn predict_proba(
        &self,
        features: ArrayView2<'_, f32>,
    ) -> Result<Option<Array2<f32>>, InferenceError> {
        self.check_width(&features)?;
        Ok(Some(self.mean_proba(features)))
    }

    fn classify(&self, features: ArrayView2<'_, f32>) -> Result<Scores, InferenceError> {
        self.check_width(&features)?;
        let proba = self.mean_proba(features);
        Ok(Scores {
            labels: self.argmax(&proba),
            probabilities: Some(proba),
        })
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// x0 <= 0.5 -> class 0, else class 1
    fn stump(left: [f64; 2], right: [f64; 2]) -> TreeArrays {
        TreeArrays {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![vec![5.0, 5.0], left.to_vec(), right.to_vec()],
        }
    }

    fn forest(trees: Vec<TreeArrays>) -> ForestClassifier {
        ForestClassifier::from_file(&ForestFile {
            n_features: 2,
            classes: vec![0, 1],
            trees,
        })
        .unwrap()
    }

    #[test]
    fn test_single_stump() {
        let f = forest(vec![stump([4.0, 1.0], [1.0, 4.0])]);
        let x = array![[0.0f32, 0.0], [1.0, 0.0]];
        assert_eq!(f.predict(x.view()).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_probabilities_average_trees() {
        let f = forest(vec![
            stump([1.0, 0.0], [0.0, 1.0]),
            stump([0.5, 0.5], [0.5, 0.5]),
        ]);
        let proba = f.predict_proba(array![[1.0f32, 0.0]].view()).unwrap().unwrap();
        assert!((proba[[0, 0]] - 0.25).abs() < 1e-6);
        assert!((proba[[0, 1]] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_tie_picks_first_class() {
        let f = forest(vec![stump([1.0, 1.0], [1.0, 1.0])]);
        assert_eq!(f.predict(array![[0.0f32, 0.0]].view()).unwrap(), vec![0]);
    }

    #[test]
    fn test_width_mismatch_is_error() {
        let f = forest(vec![stump([1.0, 0.0], [0.0, 1.0])]);
        assert!(f.predict(array![[0.0f32, 0.0, 0.0]].view()).is_err());
    }

    #[test]
    fn test_rejects_backward_child() {
        let mut t = stump([1.0, 0.0], [0.0, 1.0]);
        t.children_left[0] = 0;
        let res = ForestClassifier::from_file(&ForestFile {
            n_features: 2,
            classes: vec![0, 1],
            trees: vec![t],
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_feature() {
        let mut t = stump([1.0, 0.0], [0.0, 1.0]);
        t.feature[0] = 9;
        let res = ForestClassifier::from_file(&ForestFile {
            n_features: 2,
            classes: vec![0, 1],
            trees: vec![t],
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_rejects_classes_out_of_code_order() {
        let res = ForestClassifier::from_file(&ForestFile {
            n_features: 2,
            classes: vec![1, 0],
            trees: vec![stump([1.0, 0.0], [0.0, 1.0])],
        });
        assert!(matches!(res, Err(ArtifactError::Malformed { .. })));
    }

    #[test]
    fn test_classify_matches_separate_calls() {
        let f = forest(vec![stump([4.0, 1.0], [1.0, 4.0])]);
        let x = array![[0.0f32, 0.0], [1.0, 0.0]];
        let scores = f.classify(x.view()).unwrap();
        assert_eq!(scores.labels, f.predict(x.view()).unwrap());
        assert_eq!(scores.probabilities, f.predict_proba(x.view()).unwrap());
    }
}
