use std::sync::{Arc, LazyLock};

use rust_embed::Embed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

static SITE_CONTENT: LazyLock<Result<Arc<SiteContent>, ContentError>> =
    LazyLock::new(|| SiteContent::load().map(Arc::new));

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("content file not found: {0}")]
    Missing(String),
    #[error("couldn't parse {file}: {message}")]
    Parse { file: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub whatsapp_message: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Social {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub instagram: String,
    pub website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cv {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    pub url: String,
    pub meta_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub location: String,
    pub bio: String,
    pub contact: Contact,
    pub social: Social,
    pub cv: Cv,
    pub website: Website,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub percentage: u8,
}

impl Skill {
    /// Bar width, never past a full bar.
    pub fn width_percent(&self) -> u8 {
        self.percentage.min(100)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub demo_link: String,
    pub github_link: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: Vec<String>,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub work_experience: Vec<ExperienceItem>,
    pub education: Vec<ExperienceItem>,
    pub organizations: Vec<ExperienceItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceTab {
    #[default]
    Work,
    Education,
    Organizations,
}

impl ExperienceTab {
    pub const ALL: [Self; 3] = [Self::Work, Self::Education, Self::Organizations];

    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Work Experience",
            Self::Education => "Education",
            Self::Organizations => "Organizations",
        }
    }
}

impl Experience {
    pub fn entries(&self, tab: ExperienceTab) -> &[ExperienceItem] {
        match tab {
            ExperienceTab::Work => &self.work_experience,
            ExperienceTab::Education => &self.education,
            ExperienceTab::Organizations => &self.organizations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    pub author: String,
    pub position: String,
    pub image: String,
    pub content: String,
}

/// Everything the page renders, read once from the embedded JSON files.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteContent {
    pub personal_info: PersonalInfo,
    pub services: Vec<Service>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub stats: Vec<Stat>,
    pub experience: Experience,
    pub navigation: Vec<NavLink>,
    pub testimonials: Vec<Testimonial>,
}

fn parse<T: DeserializeOwned>(file: &str, data: &[u8]) -> Result<T, ContentError> {
    serde_json::from_slice(data).map_err(|e| ContentError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })
}

fn load<T: DeserializeOwned>(file: &str) -> Result<T, ContentError> {
    let asset = ContentAssets::get(file).ok_or_else(|| ContentError::Missing(file.to_string()))?;
    parse(file, &asset.data)
}

impl SiteContent {
    pub fn load() -> Result<Self, ContentError> {
        Ok(Self {
            personal_info: load("personal-info.json")?,
            services: load("services.json")?,
            skills: load("skills.json")?,
            projects: load("projects.json")?,
            stats: load("stats.json")?,
            experience: load("experience.json")?,
            navigation: load("navigation.json")?,
            testimonials: load("testimonials.json")?,
        })
    }
}

/// Cached site content. A broken content file is logged by the caller and
/// the page falls back to rendering without it.
pub fn site_content() -> Result<Arc<SiteContent>, ContentError> {
    (*SITE_CONTENT).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_loads() {
        let content = site_content().expect("embedded content should parse");
        assert!(!content.personal_info.name.is_empty());
        assert!(!content.services.is_empty());
        assert!(!content.navigation.is_empty());
        assert!(content.navigation.iter().all(|l| l.href.starts_with('#')));
        assert!(content.skills.iter().all(|s| s.width_percent() <= 100));
        assert!(!content.experience.entries(ExperienceTab::Work).is_empty());
    }

    #[test]
    fn test_content_is_cached() {
        let a = site_content().unwrap();
        let b = site_content().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_camel_case_fields() {
        let project: Project = parse(
            "p.json",
            br#"{"title":"t","description":"d","image":"i","demoLink":"demo","githubLink":"gh","tags":["a"]}"#,
        )
        .unwrap();
        assert_eq!(project.demo_link, "demo");
        assert_eq!(project.github_link, "gh");
    }

    #[test]
    fn test_parse_and_missing_errors() {
        let err = parse::<Vec<Skill>>("skills.json", b"[{\"name\": 3}]").unwrap_err();
        assert!(matches!(err, ContentError::Parse { ref file, .. } if file == "skills.json"));
        assert_eq!(
            load::<Vec<Stat>>("nope.json"),
            Err(ContentError::Missing("nope.json".to_string()))
        );
    }

    #[test]
    fn test_skill_width_is_clamped() {
        let skill = Skill {
            name: "Overconfidence".to_string(),
            percentage: 140,
        };
        assert_eq!(skill.width_percent(), 100);
    }

    #[test]
    fn test_experience_tabs() {
        let content = site_content().unwrap();
        for tab in ExperienceTab::ALL {
            assert!(!tab.label().is_empty());
            let _ = content.experience.entries(tab);
        }
        assert_eq!(ExperienceTab::default(), ExperienceTab::Work);
    }
}
