//! Runtime settings, read from an optional TOML file and `ENROL_*`
//! environment variables.

use std::{num::NonZeroU32, path::Path};

use anyhow::{Context as _, anyhow};
use config::{Config, ConfigBuilder, builder::DefaultState};
use enrol_api::Session;
use enrol_core::{NewStudent, StudentKind};
use serde::Deserialize;

// ─── Settings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Name of the administrator acting in this session.
  pub admin_name: String,
  /// `tracing` filter directives used when `RUST_LOG` is unset.
  pub log_level:  String,
  /// Units and students loaded before the first menu is shown.
  pub seed:       Seed,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      admin_name: "John".to_owned(),
      log_level:  "warn".to_owned(),
      seed:       Seed::starter(),
    }
  }
}

impl Settings {
  /// Load `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      Config::builder().add_source(config::File::from(path).required(false)),
    )
  }

  pub(crate) fn from_builder(
    builder: ConfigBuilder<DefaultState>,
  ) -> anyhow::Result<Self> {
    builder
      .add_source(config::Environment::with_prefix("ENROL"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

// ─── Seed data ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
  #[serde(default)]
  pub units:    Vec<SeedUnit>,
  #[serde(default)]
  pub students: Vec<SeedStudent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUnit {
  pub code:          String,
  pub title:         String,
  pub credit_points: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
  #[default]
  FullTime,
  PartTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedStudent {
  pub id:             String,
  pub name:           String,
  #[serde(default)]
  pub address:        String,
  #[serde(default)]
  pub phone:          String,
  #[serde(default)]
  pub email:          String,
  #[serde(default)]
  pub kind:           SeedKind,
  pub course_advisor: Option<String>,
}

impl From<SeedStudent> for NewStudent {
  fn from(seed: SeedStudent) -> Self {
    let kind = match seed.kind {
      SeedKind::FullTime => StudentKind::FullTime,
      SeedKind::PartTime => StudentKind::PartTime {
        course_advisor: seed.course_advisor,
      },
    };
    Self {
      id: seed.id,
      name: seed.name,
      address: seed.address,
      phone: seed.phone,
      email: seed.email,
      kind,
    }
  }
}

impl Seed {
  /// One unit and one full-time student, the state a fresh install starts in.
  pub fn starter() -> Self {
    Self {
      units:    vec![SeedUnit {
        code:          "FIT5136".to_owned(),
        title:         "Software Engineering".to_owned(),
        credit_points: 6,
      }],
      students: vec![SeedStudent {
        id:             "123123".to_owned(),
        name:           "John Lee".to_owned(),
        address:        "123 Fake Street".to_owned(),
        phone:          "1111111111".to_owned(),
        email:          "JohnLee@fakestreet.com".to_owned(),
        kind:           SeedKind::FullTime,
        course_advisor: None,
      }],
    }
  }

  /// Register every unit, then every student. Stops at the first rejection.
  pub fn apply(&self, session: &mut Session) -> anyhow::Result<()> {
    for unit in &self.units {
      let credit_points = NonZeroU32::new(unit.credit_points)
        .ok_or_else(|| anyhow!("seed unit '{}' has zero credit points", unit.code))?;
      session
        .submit_add_unit(&unit.code, &unit.title, credit_points)
        .with_context(|| format!("seeding unit '{}'", unit.code))?;
    }
    for student in &self.students {
      session
        .submit_add_student(student.clone().into())
        .with_context(|| format!("seeding student '{}'", student.id))?;
    }
    tracing::info!(
      units = self.units.len(),
      students = self.students.len(),
      "seed applied"
    );
    Ok(())
  }
}
