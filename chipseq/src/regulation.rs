use std::fmt::Display;

/// Direction of a differential expression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regulation {
    Up,
    Down,
    NotSignificant,
}

impl Display for Regulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Regulation::Up => "up",
            Regulation::Down => "down",
            Regulation::NotSignificant => "n.s.",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceThresholds {
    /// Adjusted p-values strictly below this are significant.
    pub alpha: f64,
    /// Absolute log2 fold-changes strictly above this are significant.
    pub min_log2_fold_change: f64,
}

impl Default for SignificanceThresholds {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            min_log2_fold_change: 1.0,
        }
    }
}

impl SignificanceThresholds {
    pub fn new(alpha: f64, min_log2_fold_change: f64) -> Self {
        Self {
            alpha,
            min_log2_fold_change,
        }
    }

    /// Classifies one test result. Missing or NaN values are never significant.
    pub fn classify(&self, log2_fold_change: Option<f64>, padj: Option<f64>) -> Regulation {
        let (Some(lfc), Some(padj)) = (log2_fold_change, padj) else {
            return Regulation::NotSignificant;
        };

        if !(padj < self.alpha) {
            return Regulation::NotSignificant;
        }

        if lfc > self.min_log2_fold_change {
            Regulation::Up
        } else if lfc < -self.min_log2_fold_change {
            Regulation::Down
        } else {
            Regulation::NotSignificant
        }
    }

    pub fn is_significant(&self, log2_fold_change: Option<f64>, padj: Option<f64>) -> bool {
        self.classify(log2_fold_change, padj) != Regulation::NotSignificant
    }
}

/// A single row of a differential expression table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionRecord {
    pub gene_name: String,
    pub log2_fold_change: Option<f64>,
    pub padj: Option<f64>,
}

impl ExpressionRecord {
    pub fn new(gene_name: &str, log2_fold_change: Option<f64>, padj: Option<f64>) -> Self {
        Self {
            gene_name: gene_name.to_string(),
            log2_fold_change,
            padj,
        }
    }

    pub fn regulation(&self, thresholds: &SignificanceThresholds) -> Regulation {
        thresholds.classify(self.log2_fold_change, self.padj)
    }
}
