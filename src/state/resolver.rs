// Maps a navigation selection to the content shown in the main area

use super::navigation::{Category, InstallTopic, NavigationState, SubPage};
use crate::content::Page;

/// What the main area shows for a given selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentBlock {
    /// Nothing selected yet
    Welcome,
    /// A category is open but no recognised page in it is selected
    Placeholder(Category),
    Page(Category, Page),
}

impl ContentBlock {
    pub fn category(&self) -> Option<Category> {
        match self {
            ContentBlock::Welcome => None,
            ContentBlock::Placeholder(category) | ContentBlock::Page(category, _) => {
                Some(*category)
            }
        }
    }

    /// Informational text for the welcome screen and placeholders
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ContentBlock::Welcome => Some(
                "Welcome to the App Guide & Manual! Please select a section from the sidebar to begin.",
            ),
            ContentBlock::Placeholder(Category::InstallationGuide) => Some(
                "Please select either 'General Requirement' or 'Required Library' from the 'Installation Guide' dropdown.",
            ),
            ContentBlock::Placeholder(Category::UserManual) => Some(
                "Please select a specific section from the 'User Manual' dropdown to view its content.",
            ),
            ContentBlock::Placeholder(Category::About) => Some(
                "Please select a specific section from the 'About' dropdown to view its content.",
            ),
            ContentBlock::Page(..) => None,
        }
    }
}

pub fn resolve(state: &NavigationState) -> ContentBlock {
    let Some(category) = state.category else {
        return ContentBlock::Welcome;
    };

    let page = match category {
        Category::InstallationGuide => match state.installation_sub_category {
            Some(InstallTopic::GeneralRequirement) => Some(Page::GeneralRequirement),
            Some(InstallTopic::RequiredLibrary) => Some(Page::RequiredLibrary),
            None => None,
        },
        Category::UserManual => match state.sub_page {
            Some(SubPage::ForStudents) => Some(Page::ForStudents),
            Some(SubPage::ForAdmins) => Some(Page::ForAdmins),
            Some(SubPage::AppInfo | SubPage::Contact) | None => None,
        },
        Category::About => match state.sub_page {
            Some(SubPage::AppInfo) => Some(Page::AppInfo),
            Some(SubPage::Contact) => Some(Page::Contact),
            Some(SubPage::ForStudents | SubPage::ForAdmins) | None => None,
        },
    };

    match page {
        Some(page) => ContentBlock::Page(category, page),
        None => ContentBlock::Placeholder(category),
    }
}
