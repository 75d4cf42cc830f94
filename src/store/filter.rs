use crate::models::Project;

/// Match a project against an already-normalized (trimmed, lower-cased)
/// query: case-insensitive substring on name or description
fn matches(project: &Project, needle: &str) -> bool {
    project.name.to_lowercase().contains(needle)
        || project.description.to_lowercase().contains(needle)
}

/// Pure filter from (project list, query) to the visible subset.
///
/// The query is trimmed and lower-cased; an empty or whitespace-only query
/// matches everything. Order is preserved: the visible list is always a
/// subsequence of the input.
pub fn apply_filter(projects: &[Project], query: &str) -> Vec<Project> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return projects.to_vec();
    }
    projects.iter().filter(|project| matches(project, &needle)).cloned().collect()
}
