use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::graph::{InteractionGraph, NodeRole};
use crate::model::interaction::InteractionRow;

/// Order rows by day (stable) and give each authorless row the most recent
/// known author. Rows before the first known author stay authorless.
pub fn forward_fill_authors(rows: &[InteractionRow]) -> Vec<InteractionRow> {
    let mut ordered: Vec<InteractionRow> = rows.to_vec();
    ordered.sort_by_key(|r| r.day);
    let mut last: Option<String> = None;
    for row in &mut ordered {
        match &row.author {
            Some(author) => last = Some(author.clone()),
            None => row.author = last.clone(),
        }
    }
    ordered
}

/// Distinct days present in the table, ascending.
pub fn interaction_days(rows: &[InteractionRow]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = rows.iter().map(|r| r.day).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Author/counterpart graph for `day`. Authors are filled over the whole
/// table before the day filter is applied.
pub fn build_day_graph(rows: &[InteractionRow], day: NaiveDate) -> InteractionGraph {
    let filled = forward_fill_authors(rows);

    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for row in filled.iter().filter(|r| r.day == day) {
        if let Some(author) = row.author.as_deref() {
            groups
                .entry(author)
                .or_default()
                .push(row.counterpart.as_str());
        }
    }

    let mut graph = InteractionGraph::new();
    for (author, counterparts) in groups {
        graph.add_node(author, NodeRole::Author);
        for counterpart in counterparts {
            graph.add_edge(author, counterpart);
        }
    }
    tracing::debug!(
        day = %day,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built day graph"
    );
    graph
}
