use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimumCheck {
    Optimal,
    Suboptimal { optimum: usize, found: usize },
    /// More edges than the recorded optimum: either the table or the matching is wrong.
    TooLarge { optimum: usize, found: usize },
}

impl fmt::Display for OptimumCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimumCheck::Optimal => write!(f, "Solution is optimal"),
            OptimumCheck::Suboptimal { optimum, found } => write!(
                f,
                "Solution is not optimal. Optimum: {}, Solution: {}",
                optimum, found
            ),
            OptimumCheck::TooLarge { optimum, found } => write!(
                f,
                "Solution is larger than the recorded optimum. Optimum: {}, Solution: {}",
                optimum, found
            ),
        }
    }
}

/// Known optimal matching sizes keyed by graph name.
///
/// Rows look like `name | ... | optimum`; a leading `|` is allowed, rows whose
/// last cell is not a number (headers, separators, prose) are skipped.
#[derive(Debug, Clone, Default)]
pub struct OptimaTable {
    entries: IndexMap<String, usize>,
}

impl OptimaTable {
    pub fn parse(text: &str) -> Self {
        let mut entries = IndexMap::new();
        for line in text.lines() {
            let row = line.trim().trim_start_matches('|');
            let Some((name, rest)) = row.split_once('|') else {
                continue;
            };
            let name = name.trim();
            let last = rest.trim().trim_end_matches('|').rsplit('|').next().unwrap_or("");
            let Ok(optimum) = last.trim().parse::<usize>() else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            if entries.insert(name.to_string(), optimum).is_some() {
                warn!("Optima table lists '{}' more than once; keeping the last row", name);
            }
        }
        Self { entries }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read optima table {:?}", path))?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn optimum(&self, graph_name: &str) -> Option<usize> {
        self.entries.get(graph_name).copied()
    }

    pub fn check(&self, graph_name: &str, found: usize) -> Option<OptimumCheck> {
        let optimum = self.optimum(graph_name)?;
        Some(if found == optimum {
            OptimumCheck::Optimal
        } else if found < optimum {
            OptimumCheck::Suboptimal { optimum, found }
        } else {
            OptimumCheck::TooLarge { optimum, found }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# Optima

| graph | nodes | optimum |
|-------|-------|---------|
| K3.dmx | 3 | 1 |
| petersen.dmx | 10 | 5 |
grid10.dmx | 100 | 50
";

    #[test]
    fn rows_with_and_without_leading_pipe_are_read() {
        let table = OptimaTable::parse(TABLE);
        assert_eq!(table.len(), 3);
        assert_eq!(table.optimum("K3.dmx"), Some(1));
        assert_eq!(table.optimum("grid10.dmx"), Some(50));
        assert_eq!(table.optimum("graph"), None);
    }

    #[test]
    fn check_classifies_solution_size() {
        let table = OptimaTable::parse(TABLE);
        assert_eq!(table.check("petersen.dmx", 5), Some(OptimumCheck::Optimal));
        assert_eq!(
            table.check("petersen.dmx", 4),
            Some(OptimumCheck::Suboptimal {
                optimum: 5,
                found: 4
            })
        );
        assert!(matches!(
            table.check("petersen.dmx", 6),
            Some(OptimumCheck::TooLarge { .. })
        ));
        assert_eq!(table.check("missing.dmx", 1), None);
    }
}
