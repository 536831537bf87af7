use crate::bind::{Bind, RenderBind, RenderedBind};

/// A SQL query logger that renders binds through a redacting hook.
///
/// Every bind passes through [`RenderBind::render_bind`] before the line is
/// built, so raw values never reach `tracing`.
///
/// # Examples
///
/// ```
/// use secure_fields::{Bind, BoundParameter, QueryLog, Redactor};
///
/// let log = QueryLog::new(Redactor::default());
/// let binds: Vec<Bind> = vec![
///     BoundParameter::text("name", "david").into(),
///     BoundParameter::text("password_digest", "$argon2id$...").into(),
/// ];
///
/// let line = log.render("User Create", "INSERT INTO users (name, password_digest) VALUES (?, ?)", &binds);
/// assert_eq!(
///     line,
///     r#"User Create  INSERT INTO users (name, password_digest) VALUES (?, ?)  [["name", "david"], ["password_digest", "[FILTERED]"]]"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryLog<R> {
    renderer: R,
}

impl<R: RenderBind> QueryLog<R> {
    /// Creates a query log using `renderer` for binds.
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Returns the bind renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renders every bind through the hook.
    pub fn render_binds(&self, binds: &[Bind]) -> Vec<RenderedBind> {
        binds.iter().map(|b| self.renderer.render_bind(b)).collect()
    }

    /// Builds the log line for one query.
    pub fn render(&self, name: &str, sql: &str, binds: &[Bind]) -> String {
        let mut line = format!("{}  {}", name, sql);
        if binds.is_empty() {
            return line;
        }

        let rendered: Vec<String> = self
            .render_binds(binds)
            .into_iter()
            .map(|b| match b.name {
                Some(name) => format!("[{:?}, {:?}]", name, b.value),
                None => format!("[nil, {:?}]", b.value),
            })
            .collect();

        line.push_str("  [");
        line.push_str(&rendered.join(", "));
        line.push(']');
        line
    }

    /// Renders the query and emits it at debug level.
    pub fn log(&self, name: &str, sql: &str, binds: &[Bind]) {
        let line = self.render(name, sql, binds);
        tracing::debug!(query = name, binds = binds.len(), "{}", line);
    }
}
