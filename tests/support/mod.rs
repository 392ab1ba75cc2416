use anyhow::{Context, Result};
use etl_catalog::TheoryCatalog;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small library document shaped like `ETL_EN_Complete.json`.
pub fn fixture_document() -> Value {
    json!({
        "metadata": {"title": "Educational Theory Library", "version": "fixture"},
        "educational_theories": [
            {
                "id": 1,
                "theory_name": "Constructivism",
                "theorist": "Jean Piaget",
                "category": "cognitive",
                "key_concepts": ["Schema", "Active learning"],
                "core_concepts": ["Assimilation", "Accommodation"],
                "educational_applications": ["Inquiry labs", "Project work"],
                "grade_levels": ["elementary", "middle", "high"],
                "subjects": ["all_subjects"],
                "learning_objectives": ["Develop critical thinking"],
                "related_theories": [2, 404, 3],
                "key_principles": ["Learners construct knowledge", "Build on prior knowledge"],
                "ai_prompt_template": "Create a [subject] lesson on [topic] for [grade_level] students.",
                "veteran_teacher_insights": {
                    "practical_tips": ["Open with a discrepant event", "Let students argue"],
                    "success_patterns": ["Small-group talk"],
                    "common_challenges": ["Time pressure"]
                }
            },
            {
                "id": 2,
                "theory_name": "Social Learning Theory",
                "theorist": ["Albert Bandura"],
                "category": "social",
                "key_concepts": ["Modeling", "Self-efficacy"],
                "educational_applications": ["Peer tutoring"],
                "grade_levels": ["middle"],
                "subjects": ["mathematics", "science"],
                "learning_objectives": ["Improve STUDENT ENGAGEMENT"],
                "key_principles": ["People learn by observing"]
            },
            {
                "id": 3,
                "theory_name": "Flow Theory",
                "theorist": "Mihaly Csikszentmihalyi",
                "category": "motivation",
                "key_concepts": ["Challenge-skill balance"],
                "educational_applications": ["Game-based learning"],
                "grade_levels": ["high"],
                "subjects": ["art"],
                "learning_objectives": []
            },
            {
                "id": 4,
                "theory_name": "Mastery Learning",
                "theorist": ["Benjamin Bloom", "John Carroll"],
                "category": "cognitive",
                "educational_applications": ["Formative quizzes for LEARNING checks"],
                "grade_levels": ["elementary"],
                "subjects": ["mathematics"],
                "learning_objectives": ["Reach mastery before moving on"]
            },
            {
                "id": 5,
                "key_concepts": ["Unnamed fixture"],
                "subjects": ["history"],
                "year_introduced": 1999
            }
        ]
    })
}

pub struct Fixture {
    // Held so the directory lives as long as the fixture.
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn catalog(&self) -> TheoryCatalog {
        TheoryCatalog::load(&self.path).expect("fixture catalog loads")
    }
}

pub fn write_fixture() -> Result<Fixture> {
    write_document(&fixture_document())
}

pub fn write_document(document: &Value) -> Result<Fixture> {
    let dir = TempDir::new().context("failed to allocate fixture dir")?;
    let path = dir.path().join("ETL_EN_Complete.json");
    write_json(&path, document)?;
    Ok(Fixture { dir, path })
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
