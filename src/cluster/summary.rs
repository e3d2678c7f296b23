use std::collections::BTreeSet;
use std::fmt;

use super::ClusteringResult;

/// How many member names are listed per cluster before truncating.
pub const PREVIEW_LEN: usize = 5;

/// Members of one cluster, names sorted alphabetically.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterGroup {
    /// Zero-based cluster id.
    pub id: usize,
    pub names: Vec<String>,
}

impl ClusterGroup {
    /// 1-based label shown to users.
    pub fn label(&self) -> String {
        format!("Cluster {}", self.id + 1)
    }

    /// The first [`PREVIEW_LEN`] names and how many were left out.
    pub fn preview(&self) -> (&[String], usize) {
        let shown = self.names.len().min(PREVIEW_LEN);
        (&self.names[..shown], self.names.len() - shown)
    }
}

/// Per-cluster membership, one group per cluster id present in the labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterSummary {
    pub groups: Vec<ClusterGroup>,
}

impl ClusterSummary {
    pub fn from_result(result: &ClusteringResult) -> Self {
        Self::from_labels(&result.labels, &result.names)
    }

    pub fn from_labels(labels: &[usize], names: &[String]) -> Self {
        let ids: BTreeSet<usize> = labels.iter().copied().collect();
        let groups = ids
            .into_iter()
            .map(|id| {
                let mut names: Vec<String> = labels
                    .iter()
                    .zip(names)
                    .filter(|(&l, _)| l == id)
                    .map(|(_, n)| n.clone())
                    .collect();
                names.sort();
                ClusterGroup { id, names }
            })
            .collect();
        ClusterSummary { groups }
    }
}

impl fmt::Display for ClusterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(60);
        writeln!(f)?;
        writeln!(f, "{banner}")?;
        writeln!(f, "CLUSTERING SUMMARY")?;
        writeln!(f, "{banner}")?;

        for group in &self.groups {
            writeln!(f)?;
            writeln!(f, "{} ({} countries):", group.label(), group.names.len())?;
            let (shown, rest) = group.preview();
            for name in shown {
                writeln!(f, "   - {name}")?;
            }
            if rest > 0 {
                writeln!(f, "   ... and {rest} more")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_are_ordered_by_id_with_sorted_names() {
        let summary = ClusterSummary::from_labels(
            &[1, 0, 1, 0],
            &names(&["Peru", "Chile", "Angola", "Benin"]),
        );
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].id, 0);
        assert_eq!(summary.groups[0].names, names(&["Benin", "Chile"]));
        assert_eq!(summary.groups[1].names, names(&["Angola", "Peru"]));
    }

    #[test]
    fn long_clusters_are_truncated_to_five() {
        let labels = vec![0; 8];
        let summary =
            ClusterSummary::from_labels(&labels, &names(&["h", "g", "f", "e", "d", "c", "b", "a"]));
        let text = summary.to_string();

        assert!(text.contains("CLUSTERING SUMMARY"));
        assert!(text.contains("Cluster 1 (8 countries):"));
        assert!(text.contains("   - a\n"));
        assert!(text.contains("   - e\n"));
        assert!(!text.contains("   - f\n"));
        assert!(text.contains("   ... and 3 more"));
    }

    #[test]
    fn short_clusters_have_no_more_line() {
        let summary = ClusterSummary::from_labels(&[0, 0], &names(&["x", "y"]));
        let (shown, rest) = summary.groups[0].preview();
        assert_eq!(shown.len(), 2);
        assert_eq!(rest, 0);
        assert!(!summary.to_string().contains("more"));
    }

    #[test]
    fn banner_is_sixty_wide() {
        let text = ClusterSummary::default().to_string();
        assert!(text.contains(&format!("\n{}\n", "=".repeat(60))));
    }
}
