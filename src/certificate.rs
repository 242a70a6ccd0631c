use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::DigitalBadge;

const DEFAULT_TEMPLATE: &str = "\
デジタルバッジ証明書 / Digital Badge Certificate

Badge:       {{ title }}
Description: {{ description }}
Issuer:      {{ issuer_company }}
Issued:      {{ issued_date }}

This badge is issued as proof of completing task {{ task_id }}.
";

/// Renders plain-text certificates for badges. A user template file, when
/// configured, replaces the built-in one.
pub struct CertificateRenderer {
    template_path: Option<PathBuf>,
}

impl CertificateRenderer {
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self { template_path }
    }

    fn load_template(&self) -> Result<String> {
        match self.template_path {
            Some(ref path) => std::fs::read_to_string(path).map_err(|e| {
                Error::Template(format!(
                    "failed to read certificate template {}: {e}",
                    path.display()
                ))
            }),
            None => Ok(DEFAULT_TEMPLATE.to_string()),
        }
    }

    pub fn render(&self, badge: &DigitalBadge) -> Result<String> {
        let source = self.load_template()?;
        let engine = upon::Engine::new();
        let template = engine
            .compile(source.as_str())
            .map_err(|e| Error::Template(format!("invalid certificate template: {e}")))?;
        template
            .render(
                &engine,
                upon::value! {
                    title: badge.title.clone(),
                    description: badge.description.clone(),
                    issuer_company: badge.issuer_company.clone(),
                    issued_date: badge.issued_date.format("%Y/%m/%d").to_string(),
                    task_id: badge.task_id.clone(),
                    badge_id: badge.id.clone()
                },
            )
            .to_string()
            .map_err(|e| Error::Template(format!("failed to render certificate: {e}")))
    }

    /// Render `badge` into `dir` and return the written path.
    pub fn write(&self, badge: &DigitalBadge, dir: &Path) -> Result<PathBuf> {
        let content = self.render(badge)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(file_name(badge));
        std::fs::write(&path, content)?;
        debug!(path = %path.display(), "certificate written");
        Ok(path)
    }
}

/// `<title>_certificate.txt`, with path separators replaced.
pub fn file_name(badge: &DigitalBadge) -> String {
    let title: String = badge
        .title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{title}_certificate.txt")
}
