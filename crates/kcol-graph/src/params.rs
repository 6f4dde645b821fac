use kcol_core::errors::KcolError;
use serde::{Deserialize, Serialize};

/// Construction strategy used by [`generate`](crate::generate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    /// Caller-sized partitions, backward-scan spanning edges, one-pass density sweep.
    #[default]
    Partitioned,
    /// Classes by `id mod k`, each new node joined to a random earlier node.
    ConnectedModK,
    /// Classes by `id mod k`, nodes chained in a line.
    LineModK,
    /// Classes by `id mod k`, no connectivity seed.
    UnconnectedModK,
    /// Triangles over classes 0, 1, 2 plus random cross edges.
    Triangles,
}

impl GeneratorKind {
    /// Kebab-case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Partitioned => "partitioned",
            GeneratorKind::ConnectedModK => "connected-mod-k",
            GeneratorKind::LineModK => "line-mod-k",
            GeneratorKind::UnconnectedModK => "unconnected-mod-k",
            GeneratorKind::Triangles => "triangles",
        }
    }
}

/// Inputs of the constrained random graph generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    /// Target number of nodes.
    pub num_nodes: usize,
    /// Number of planted color classes.
    pub k: usize,
    /// Fraction of valid extra edges to add, in `[0, 1]`.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Degree cap for every node; `None` means unbounded.
    #[serde(default)]
    pub max_degree: Option<usize>,
    /// Sizes of the planted classes; `None` splits `num_nodes` uniformly.
    #[serde(default)]
    pub set_sizes: Option<Vec<usize>>,
    /// Construction strategy.
    #[serde(default)]
    pub kind: GeneratorKind,
    /// Failed random draws tolerated by the `*-mod-k` generators before they stop adding edges.
    #[serde(default)]
    pub max_failed_draws: Option<usize>,
}

fn default_density() -> f64 {
    0.5
}

impl GeneratorParams {
    /// Partitioned parameters with uniform class sizes and no degree cap.
    pub fn new(num_nodes: usize, k: usize, density: f64) -> Self {
        Self {
            num_nodes,
            k,
            density,
            max_degree: None,
            set_sizes: None,
            kind: GeneratorKind::Partitioned,
            max_failed_draws: None,
        }
    }

    /// Sets the degree cap.
    pub fn with_max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = Some(max_degree);
        self
    }

    /// Sets explicit class sizes.
    pub fn with_set_sizes(mut self, set_sizes: Vec<usize>) -> Self {
        self.set_sizes = Some(set_sizes);
        self
    }

    /// Selects the construction strategy.
    pub fn with_kind(mut self, kind: GeneratorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Checks every input, failing on the first malformed one.
    pub fn validate(&self) -> Result<(), KcolError> {
        if self.k < 2 {
            return Err(KcolError::invalid_parameter("k", self.k, "k must be at least 2"));
        }
        if self.kind == GeneratorKind::Triangles {
            self.validate_triangles()?;
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(KcolError::invalid_parameter(
                "density",
                self.density,
                "density must lie in [0, 1]",
            ));
        }
        if self.max_degree == Some(0) {
            return Err(KcolError::invalid_parameter(
                "max_degree",
                0,
                "max_degree must be at least 1",
            ));
        }
        if let Some(sizes) = &self.set_sizes {
            if sizes.len() != self.k {
                return Err(KcolError::invalid_parameter(
                    "set_sizes",
                    format!("{sizes:?}"),
                    "set_sizes must hold exactly k entries",
                ));
            }
            if let Some(position) = sizes.iter().position(|size| *size < 1) {
                return Err(KcolError::invalid_parameter(
                    "set_sizes",
                    format!("{sizes:?}"),
                    format!("set_sizes[{position}] must be at least 1"),
                ));
            }
        }
        Ok(())
    }

    /// Triangles always plant three classes and place edges without a degree cap.
    fn validate_triangles(&self) -> Result<(), KcolError> {
        if self.k != 3 {
            return Err(KcolError::invalid_parameter(
                "k",
                self.k,
                "the triangles generator plants exactly 3 classes",
            ));
        }
        if let Some(cap) = self.max_degree {
            return Err(KcolError::invalid_parameter(
                "max_degree",
                cap,
                "the triangles generator does not support a degree cap",
            ));
        }
        if let Some(sizes) = &self.set_sizes {
            return Err(KcolError::invalid_parameter(
                "set_sizes",
                format!("{sizes:?}"),
                "the triangles generator sizes its classes from num_nodes",
            ));
        }
        Ok(())
    }

    /// Class sizes to build, explicit or uniform.
    pub fn resolved_set_sizes(&self) -> Vec<usize> {
        self.set_sizes
            .clone()
            .unwrap_or_else(|| uniform_set_sizes(self.num_nodes, self.k))
    }

    /// Returns true if `degree` still leaves room for one more edge.
    pub fn below_cap(&self, degree: usize) -> bool {
        self.max_degree.map_or(true, |cap| degree < cap)
    }
}

/// Splits `num_nodes` into `k` classes, spreading the remainder over the first classes.
pub fn uniform_set_sizes(num_nodes: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let common = num_nodes / k;
    let remainder = num_nodes % k;
    (0..k)
        .map(|class| if class < remainder { common + 1 } else { common })
        .collect()
}
