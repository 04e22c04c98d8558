// Navigation state - which sidebar entry is active
//
// The state is a small `Copy` value. Selection operations take the current
// state and return the next one; the app shell owns the value for the session.

/// Top-level sidebar group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    InstallationGuide,
    UserManual,
    About,
}

/// Second-level selection inside the Installation Guide group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstallTopic {
    GeneralRequirement,
    RequiredLibrary,
}

/// Second-level selection inside the User Manual and About groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubPage {
    ForStudents,
    ForAdmins,
    AppInfo,
    Contact,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::InstallationGuide,
        Category::UserManual,
        Category::About,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::InstallationGuide => "installation-guide",
            Category::UserManual => "user-manual",
            Category::About => "about",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match normalize_key(key).as_str() {
            "installation-guide" | "installation" | "install" => Some(Category::InstallationGuide),
            "user-manual" | "manual" => Some(Category::UserManual),
            "about" => Some(Category::About),
            _ => None,
        }
    }

    /// Label of the collapsible sidebar group
    pub fn sidebar_label(&self) -> &'static str {
        match self {
            Category::InstallationGuide => "🛠️ Installation Guide",
            Category::UserManual => "📖 User Manual",
            Category::About => "ℹ️ About",
        }
    }

    /// Title shown at the top of the content area
    pub fn title(&self) -> &'static str {
        match self {
            Category::InstallationGuide => "🛠️ Installation Guide",
            Category::UserManual => "📖 User Manual",
            Category::About => "ℹ️ About This Application",
        }
    }
}

impl InstallTopic {
    pub const ALL: [InstallTopic; 2] =
        [InstallTopic::GeneralRequirement, InstallTopic::RequiredLibrary];

    pub fn key(&self) -> &'static str {
        match self {
            InstallTopic::GeneralRequirement => "general-requirement",
            InstallTopic::RequiredLibrary => "required-library",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == normalize_key(key))
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallTopic::GeneralRequirement => "General Requirement",
            InstallTopic::RequiredLibrary => "Required Library",
        }
    }
}

impl SubPage {
    pub const USER_MANUAL: [SubPage; 2] = [SubPage::ForStudents, SubPage::ForAdmins];
    pub const ABOUT: [SubPage; 2] = [SubPage::AppInfo, SubPage::Contact];

    pub fn key(&self) -> &'static str {
        match self {
            SubPage::ForStudents => "for-students",
            SubPage::ForAdmins => "for-admins",
            SubPage::AppInfo => "app-info",
            SubPage::Contact => "contact",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::USER_MANUAL
            .into_iter()
            .chain(Self::ABOUT)
            .find(|p| p.key() == normalize_key(key))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubPage::ForStudents => "1. For Students",
            SubPage::ForAdmins => "2. For Admins",
            SubPage::AppInfo => "App Information",
            SubPage::Contact => "Contact & Support",
        }
    }
}

/// Accepts "General Requirement", "general_requirement" and "general-requirement" alike.
fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub category: Option<Category>,
    pub sub_page: Option<SubPage>,
    pub installation_sub_category: Option<InstallTopic>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_installation(self, sub_category: InstallTopic) -> Self {
        Self {
            category: Some(Category::InstallationGuide),
            sub_page: None,
            installation_sub_category: Some(sub_category),
        }
    }

    pub fn select_user_manual(self, sub_page: SubPage) -> Self {
        Self {
            category: Some(Category::UserManual),
            sub_page: Some(sub_page),
            installation_sub_category: None,
        }
    }

    pub fn select_about(self, sub_page: SubPage) -> Self {
        Self {
            category: Some(Category::About),
            sub_page: Some(sub_page),
            installation_sub_category: None,
        }
    }

    /// Parse a section path like `user-manual/for-admins`.
    ///
    /// Returns `None` when the category is unknown. A known category with a
    /// missing or unknown page yields that category with nothing selected.
    pub fn from_section(section: &str) -> Option<Self> {
        let mut parts = section.trim().trim_matches('/').splitn(2, '/');
        let category = Category::from_key(parts.next()?)?;
        let page = parts.next().unwrap_or_default();

        Some(match category {
            Category::InstallationGuide => Self {
                category: Some(category),
                sub_page: None,
                installation_sub_category: InstallTopic::from_key(page),
            },
            Category::UserManual | Category::About => Self {
                category: Some(category),
                sub_page: SubPage::from_key(page),
                installation_sub_category: None,
            },
        })
    }

    /// Section path for the current selection, the inverse of `from_section`
    pub fn section(&self) -> Option<String> {
        let category = self.category?;
        let page = match category {
            Category::InstallationGuide => self.installation_sub_category.map(|t| t.key()),
            Category::UserManual | Category::About => self.sub_page.map(|p| p.key()),
        };
        Some(match page {
            Some(page) => format!("{}/{}", category.key(), page),
            None => category.key().to_string(),
        })
    }

    pub fn is_installation_selected(&self, topic: InstallTopic) -> bool {
        self.category == Some(Category::InstallationGuide)
            && self.installation_sub_category == Some(topic)
    }

    pub fn is_page_selected(&self, category: Category, page: SubPage) -> bool {
        self.category == Some(category) && self.sub_page == Some(page)
    }
}
