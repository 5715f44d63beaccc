//! The landing page elements that architect mode can target.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Purple,
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Hero,
    Header,
    Card,
    Section,
}

#[derive(Debug, Clone, Copy)]
pub struct PageElement {
    pub id: &'static str,
    pub kind: ElementKind,
    pub eyebrow: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub accent: Accent,
}

/// In page order.
pub const PAGE_ELEMENTS: [PageElement; 7] = [
    PageElement {
        id: "hero",
        kind: ElementKind::Hero,
        eyebrow: "Core Engine Online",
        title: "AGENTIC STACKS",
        description: "Decentralized AI orchestration for senior engineering teams. \
            We don't just build software; we build the entities that build software.",
        tags: &[],
        accent: Accent::Blue,
    },
    PageElement {
        id: "products-header",
        kind: ElementKind::Header,
        eyebrow: "The Fleet Ecosystem",
        title: "Core Modules",
        description: "",
        tags: &[],
        accent: Accent::Blue,
    },
    PageElement {
        id: "core-card",
        kind: ElementKind::Card,
        eyebrow: "",
        title: "TwistedCore",
        description: "Distributed AI Development Framework orchestrating multiple agents across our mesh network.",
        tags: &["Mesh-Net", "Llama-3"],
        accent: Accent::Blue,
    },
    PageElement {
        id: "command-card",
        kind: ElementKind::Card,
        eyebrow: "",
        title: "Command",
        description: "Web-based monitoring platform. Visual workflow builder and real-time agent metrics.",
        tags: &["Real-Time", "Flux"],
        accent: Accent::Purple,
    },
    PageElement {
        id: "dashboard-card",
        kind: ElementKind::Card,
        eyebrow: "",
        title: "Observer",
        description: "Native macOS SwiftUI application for system resource monitoring and terminal control.",
        tags: &["SwiftUI", "Metal"],
        accent: Accent::Green,
    },
    PageElement {
        id: "security-card",
        kind: ElementKind::Card,
        eyebrow: "",
        title: "IronBox",
        description: "Autonomous security scanning and vulnerability assessment with Kali Linux integration.",
        tags: &["Ethical", "SecOps"],
        accent: Accent::Red,
    },
    PageElement {
        id: "infra-section",
        kind: ElementKind::Section,
        eyebrow: "Deployment Architecture",
        title: "Decentralized Compute Nodes",
        description: "Edge nodes, the orchestration mesh and the agent workflow pipeline.",
        tags: &[],
        accent: Accent::Purple,
    },
];

pub fn find(id: &str) -> Option<&'static PageElement> {
    PAGE_ELEMENTS.iter().find(|element| element.id == id)
}

pub fn cards() -> impl Iterator<Item = &'static PageElement> {
    PAGE_ELEMENTS
        .iter()
        .filter(|element| element.kind == ElementKind::Card)
}
