/// Destination after a product is created or edited.
pub const ADMIN: &str = "/admin";
/// Destination after a valid checkout.
pub const CONFIRM: &str = "/confirm";

pub trait Navigator {
    fn go_to(&mut self, path: &str);
}

/// Records visited paths in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    paths: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.paths.last().map(String::as_str)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Navigator for History {
    fn go_to(&mut self, path: &str) {
        tracing::debug!(path, "navigate");
        self.paths.push(path.to_string());
    }
}
