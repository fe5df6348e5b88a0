use anyhow::{Context, Result, bail};
use endesha_editor_config::{Config, MarkdownConfig};
use endesha_editor_engine::{
    AnswerRecord, AnswerSession, DecodeError, ProjectorConfig, decode, io, preview, project,
};
use std::fmt;
use std::path::{Path, PathBuf};

pub fn projector_config(markdown: &MarkdownConfig) -> ProjectorConfig {
    ProjectorConfig {
        heading_trigger: markdown.heading_trigger.clone(),
        separator: markdown.separator.clone(),
    }
}

/// Why a stored answer needs attention.
#[derive(Debug, PartialEq, Eq)]
pub enum Problem {
    Undecodable(DecodeError),
    StaleMarkdown { expected: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Undecodable(err) => write!(f, "content does not decode: {err}"),
            Problem::StaleMarkdown { .. } => f.write_str("answer_md differs from its content"),
        }
    }
}

pub fn check_record(record: &AnswerRecord, config: &ProjectorConfig) -> Option<Problem> {
    match decode(&record.answer) {
        Err(err) => Some(Problem::Undecodable(err)),
        // Content-less answers were written in plain mode, their Markdown is the source
        Ok(doc) if !doc.has_text() && !record.answer_md.trim().is_empty() => None,
        Ok(doc) => {
            let expected = project(&doc, config);
            (expected != record.answer_md).then_some(Problem::StaleMarkdown { expected })
        }
    }
}

pub struct Runner {
    config: Config,
    projector: ProjectorConfig,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        let projector = projector_config(&config.markdown);
        Self { config, projector }
    }

    fn load(&self, record: &Path) -> Result<(PathBuf, AnswerRecord)> {
        let path = self.config.resolve_record(record);
        let loaded = io::read_record(&path)
            .with_context(|| format!("Failed to read answer record {}", path.display()))?;
        Ok((path, loaded))
    }

    fn session(&self, record: &AnswerRecord) -> AnswerSession {
        AnswerSession::from_record(record, self.projector.clone())
    }

    pub fn render(&self, record: &Path) -> Result<String> {
        let (_, loaded) = self.load(record)?;
        Ok(self.session(&loaded).editor().markdown().to_string())
    }

    pub fn preview(&self, record: &Path) -> Result<String> {
        let (_, loaded) = self.load(record)?;
        Ok(preview::render_html(self.session(&loaded).editor().markdown()))
    }

    pub fn check(&self, records: &[PathBuf]) -> Result<()> {
        let mut failing = 0;
        for record in records {
            let (path, loaded) = self.load(record)?;
            match check_record(&loaded, &self.projector) {
                Some(problem) => {
                    failing += 1;
                    println!("{}: {problem}", path.display());
                }
                None => log::debug!("{} is up to date", path.display()),
            }
        }
        if failing > 0 {
            bail!("{failing} of {} answers need attention", records.len());
        }
        println!("{} answers checked", records.len());
        Ok(())
    }

    /// Rewrite `answer_md` from the record's content. Returns the new
    /// Markdown when it changed.
    pub fn sync(&self, record: &Path, dry_run: bool) -> Result<Option<String>> {
        let (path, mut loaded) = self.load(record)?;
        match check_record(&loaded, &self.projector) {
            None => Ok(None),
            Some(Problem::Undecodable(err)) => Err(err).with_context(|| {
                format!("Cannot regenerate Markdown for {}", path.display())
            }),
            Some(Problem::StaleMarkdown { expected }) => {
                if dry_run {
                    log::info!("dry run, leaving {} unchanged", path.display());
                } else {
                    loaded.answer_md = expected.clone();
                    io::write_record(&path, &loaded)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                Ok(Some(expected))
            }
        }
    }
}
