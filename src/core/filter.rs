use poem_openapi::Enum;

use super::sqlx_utils::SqlxBinds;

/// WHERE clauses plus their positional binds, built up one predicate at a time.
/// Every predicate is AND-ed by `query_builder`.
#[derive(Clone, Debug, Default)]
pub struct Filters {
    pub wheres: Vec<String>,
    pub binds: Vec<SqlxBinds>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clause without a bind, e.g. `is_active IS TRUE`.
    pub fn push(&mut self, clause: &str) {
        self.wheres.push(clause.to_string());
    }

    /// Clause with one bind; `{}` marks where its placeholder goes.
    pub fn push_bind(&mut self, clause: &str, value: SqlxBinds) {
        self.binds.push(value);
        self.wheres
            .push(clause.replace("{}", &format!("${}", self.binds.len())));
    }

    pub fn eq(&mut self, column: &str, value: SqlxBinds) {
        self.push_bind(&format!("{} = {{}}", column), value);
    }

    pub fn eq_opt(&mut self, column: &str, value: Option<SqlxBinds>) {
        if let Some(val) = value {
            self.eq(column, val);
        }
    }

    /// Case-insensitive substring match against any of `columns`.
    /// Blank terms add nothing.
    pub fn search(&mut self, columns: &[&str], term: Option<String>) {
        let term = match term {
            Some(val) if !val.trim().is_empty() => val,
            _ => return,
        };
        self.binds
            .push(SqlxBinds::String(format!("%{}%", escape_like(term.trim()))));
        let idx = self.binds.len();
        let clauses: Vec<String> = columns
            .iter()
            .map(|column| format!("{} ILIKE ${}", column, idx))
            .collect();
        self.wheres.push(format!("({})", clauses.join(" OR ")));
    }
}

/// Escape LIKE wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[oai(rename_all = "lowercase")]
pub enum DestinationTypeFilter {
    #[default]
    All,
    Featured,
    International,
    Domestic,
}

impl DestinationTypeFilter {
    pub fn apply(&self, filters: &mut Filters) {
        match self {
            DestinationTypeFilter::All => {}
            DestinationTypeFilter::Featured => filters.push("is_featured IS TRUE"),
            DestinationTypeFilter::International => filters.push("is_international IS TRUE"),
            DestinationTypeFilter::Domestic => filters.push("is_international IS FALSE"),
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[oai(rename_all = "lowercase")]
pub enum ActiveStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveStatusFilter {
    pub fn apply(&self, filters: &mut Filters) {
        match self {
            ActiveStatusFilter::All => {}
            ActiveStatusFilter::Active => filters.push("is_active IS TRUE"),
            ActiveStatusFilter::Inactive => filters.push("is_active IS FALSE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_builds_or_group() {
        let mut filters = Filters::new();
        filters.search(&["name", "city", "country"], Some("Goa".to_string()));
        assert_eq!(
            filters.wheres,
            vec!["(name ILIKE $1 OR city ILIKE $1 OR country ILIKE $1)".to_string()]
        );
        assert_eq!(filters.binds, vec![SqlxBinds::String("%Goa%".to_string())]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let mut filters = Filters::new();
        filters.search(&["name"], Some("   ".to_string()));
        filters.search(&["name"], None);
        assert!(filters.wheres.is_empty());
        assert!(filters.binds.is_empty());
    }

    #[test]
    fn test_placeholders_follow_bind_order() {
        let mut filters = Filters::new();
        filters.eq("role", SqlxBinds::String("vendor".to_string()));
        filters.search(&["email", "full_name"], Some("priya".to_string()));
        ActiveStatusFilter::Active.apply(&mut filters);
        assert_eq!(
            filters.wheres,
            vec![
                "role = $1".to_string(),
                "(email ILIKE $2 OR full_name ILIKE $2)".to_string(),
                "is_active IS TRUE".to_string(),
            ]
        );
        assert_eq!(filters.binds.len(), 2);
    }

    #[test]
    fn test_push_bind_subquery() {
        let mut filters = Filters::new();
        filters.eq("status", SqlxBinds::String("new".to_string()));
        filters.push_bind(
            "venue_id IN (SELECT id FROM public.venue WHERE vendor_id = {})",
            SqlxBinds::Uuid(uuid::Uuid::nil()),
        );
        assert_eq!(
            filters.wheres[1],
            "venue_id IN (SELECT id FROM public.venue WHERE vendor_id = $2)"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_destination_type_filter() {
        let mut filters = Filters::new();
        DestinationTypeFilter::All.apply(&mut filters);
        assert!(filters.wheres.is_empty());
        DestinationTypeFilter::Domestic.apply(&mut filters);
        assert_eq!(filters.wheres, vec!["is_international IS FALSE".to_string()]);
    }
}
