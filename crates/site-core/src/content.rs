//! Static marketing content for the site.

use serde::Serialize;

/// Firm contact details shown in the header, footer and chat fallback.
#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub phone: &'static str,
    pub email: &'static str,
    pub address: &'static [&'static str],
}

pub const CONTACT: ContactInfo = ContactInfo {
    phone: "614-699-0603",
    email: "info@nactax.net",
    address: &["5081 island club drive", "Fort Lauderdale", "33319 USA"],
};

/// Icon shown on a highlight panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightIcon {
    File,
    Calculator,
    Legal,
}

/// One of the three panels under the hero banner.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHighlight {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: HighlightIcon,
    pub color_class: &'static str,
}

pub const HIGHLIGHTS: &[ServiceHighlight] = &[
    ServiceHighlight {
        title: "PERSONAL & BUSINESS TAX RETURNS",
        description: "Our core specialty is the preparation of tax returns for individuals as well as business and corporate taxpayers, with due care and taking our client's maximum benefits into account.",
        icon: HighlightIcon::File,
        color_class: "bg-green",
    },
    ServiceHighlight {
        title: "BUSINESS ACCOUNTING AND PAYROLL SERVICES",
        description: "Financial Statement preparation for small business clients is a long-standing service of this firm. Depending on the client's needs, monthly, quarterly and year-end balance reporting.",
        icon: HighlightIcon::Calculator,
        color_class: "bg-purple",
    },
    ServiceHighlight {
        title: "BUSINESS STARTUP, IRS ISSUES & OTHER LEGAL SERVICES",
        description: "Apart from our core Tax and Business Accounting services, we also assist our valued clients with IRS matters and inquiries, business formation and incorporation, sales tax registration and filing, and ongoing compliance support.",
        icon: HighlightIcon::Legal,
        color_class: "bg-teal",
    },
];

/// A tile in the "Our Services" grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridService {
    pub title: &'static str,
    pub image_url: &'static str,
    pub color_class: &'static str,
}

pub const SERVICE_GRID: &[GridService] = &[
    GridService { title: "PERSONAL AND BUSINESS TAX RETURN", image_url: "https://picsum.photos/id/20/400/300", color_class: "bg-dark" },
    GridService { title: "CERTIFIED E-FILER", image_url: "https://picsum.photos/id/119/400/300", color_class: "bg-green" },
    GridService { title: "LOCAL/FEDERAL RETURN PREPARATION AND FILING", image_url: "https://picsum.photos/id/180/400/300", color_class: "bg-yellow" },
    GridService { title: "MAX. TAX REFUNDS & SAVING", image_url: "https://picsum.photos/id/24/400/300", color_class: "bg-red" },
    GridService { title: "BUSINESS START UP AND INCORPORATION", image_url: "https://picsum.photos/id/3/400/300", color_class: "bg-orange" },
    GridService { title: "PREPARATION AND ANALYSIS OF FINANCIAL STATEMENTS", image_url: "https://picsum.photos/id/48/400/300", color_class: "bg-teal" },
    GridService { title: "FINANCIAL & TAX PLANNING AND NET WORTH TRACKING", image_url: "https://picsum.photos/id/60/400/300", color_class: "bg-purple" },
    GridService { title: "IRS ISSUES AND AUDIT ASSISTANCE", image_url: "https://picsum.photos/id/160/400/300", color_class: "bg-grey" },
    GridService { title: "BUSINESS ACCOUNTING AND PAYROLL", image_url: "https://picsum.photos/id/119/400/300", color_class: "bg-amber" },
    GridService { title: "BUSINESS CONSULTING", image_url: "https://picsum.photos/id/107/400/300", color_class: "bg-indigo" },
    GridService { title: "BUYING AND SELLING A BUSINESS", image_url: "https://picsum.photos/id/201/400/300", color_class: "bg-sea" },
    GridService { title: "WILL, POA, CONTRACT DRAFTING AND OTHER LEGAL SERVICES", image_url: "https://picsum.photos/id/445/400/300", color_class: "bg-sky" },
];

/// Menu entry that opens the recommended-products view instead of a service page.
pub const DOWNLOAD_MENU_ITEM: &str = "Download";

/// A category in the header's Services dropdown.
#[derive(Debug, Clone, Serialize)]
pub struct MenuCategory {
    pub label: &'static str,
    pub items: &'static [&'static str],
}

pub const SERVICE_MENU: &[MenuCategory] = &[
    MenuCategory {
        label: "Business",
        items: &[
            "Business Accounting and Payroll",
            "Business Consulting",
            "Business Start up and Incorporation",
            "Buying and Selling a Business",
            "Preparation and Analysis of Financial Statements",
        ],
    },
    MenuCategory {
        label: "Personal Finance",
        items: &[
            "Financial & Tax Planning and Net worth tracking",
            "Local/Federal Return Preparation and Filing",
            "Max. Tax Refunds & Saving",
            "IRS Issues and Audit Assistance",
            "Will, POA, Contract Drafting and Other Legal Services",
        ],
    },
    MenuCategory {
        label: "Other Services",
        items: &[
            "Personal and Business Tax Return",
            DOWNLOAD_MENU_ITEM,
            "Certified E-Filer",
        ],
    },
];

/// Bullet list on every service-detail page.
pub const SERVICE_OFFERINGS: &[&str] = &[
    "Professional and accurate preparation",
    "Timely filing and compliance checks",
    "Strategic advice and consulting",
    "Support for audits and inquiries",
    "Customized solutions for your unique situation",
];

/// Sidebar links on every service-detail page.
pub const RELATED_SERVICES: &[&str] = &["Business Consulting", "Tax Planning", "Financial Analysis"];

/// Rendering data for a service-detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    pub title: String,
    pub title_lower: String,
    pub banner_url: String,
    pub offerings: &'static [&'static str],
    pub related: &'static [&'static str],
}

impl ServiceDetail {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            title_lower: title.to_lowercase(),
            banner_url: format!("https://picsum.photos/id/{}/1920/600", banner_image_id(title)),
            offerings: SERVICE_OFFERINGS,
            related: RELATED_SERVICES,
        }
    }
}

/// Deterministic banner image for a service title.
pub fn banner_image_id(title: &str) -> usize {
    (title.chars().count() * 7) % 50 + 10
}

/// Reasons to use the recommended accounting tool (products view).
pub const PRODUCT_BENEFITS: &[(&str, &str)] = &[
    ("Track Income & Expenses", "See where your money is going with real-time insights."),
    ("Simplify Payroll & Taxes", "Generate payroll reports and keep tax compliance simple."),
    ("Create Professional Invoices", "Send polished invoices to clients and track payments."),
    ("Easy Integration", "Wave works seamlessly with your bank and credit card accounts."),
    ("Completely Free", "Access essential accounting features without monthly fees."),
];

pub const PRODUCT_DOWNLOAD_URL: &str = "https://www.waveapps.com/";
