//! Traditional vs assisted workflow comparison shown on the portal's
//! overview page.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub title: &'static str,
    pub steps: &'static [&'static str],
    pub total_time: &'static str,
    pub satisfaction: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub traditional: &'static str,
    pub assisted: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub traditional: WorkflowSummary,
    pub assisted: WorkflowSummary,
    pub metrics: &'static [MetricRow],
}

const METRICS: &[MetricRow] = &[
    MetricRow {
        metric: "Time to Complete",
        traditional: "8 hours",
        assisted: "3 minutes",
    },
    MetricRow {
        metric: "Clicks Required",
        traditional: "15+",
        assisted: "2-3",
    },
    MetricRow {
        metric: "Error Rate",
        traditional: "15-20%",
        assisted: "<1%",
    },
    MetricRow {
        metric: "Satisfaction",
        traditional: "3/5 ⭐",
        assisted: "4.8/5 ⭐",
    },
    MetricRow {
        metric: "Accessibility",
        traditional: "Low",
        assisted: "High",
    },
];

pub fn comparison() -> Comparison {
    Comparison {
        traditional: WorkflowSummary {
            title: "Traditional Workflow (Before)",
            steps: &[
                "Visit government office",
                "Take a number (~30 min wait)",
                "Collect form (manual)",
                "Fill form (15 min)",
                "Submit documents",
                "Wait for processing",
                "Return for result",
            ],
            total_time: "8-10 hours",
            satisfaction: "3/5",
        },
        assisted: WorkflowSummary {
            title: "AI-Enhanced Workflow (After)",
            steps: &[
                "Open app",
                "Select service (5 sec)",
                "Chat with AI (optional)",
                "AI auto-fills form",
                "Review & confirm",
                "One-click submit",
                "Real-time tracking",
            ],
            total_time: "2-5 minutes",
            satisfaction: "4.8/5",
        },
        metrics: METRICS,
    }
}
