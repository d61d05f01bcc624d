//! Plan assembly from form input.
//!
//! The five phase sections are fixed text. Only the overview changes with the
//! form, and the assembler never interprets field content.

use crate::models::{FormState, PlanDocument, PlanSection};
use crate::timeline;

/// Phase sections in display order: (title, bullets)
const PHASES: [(&str, [&str; 5]); 5] = [
    (
        "1. Project Initiation",
        [
            "Define scope & success criteria; capture high-level requirements and constraints.",
            "Identify stakeholders; map RACI and engagement approach.",
            "Draft business case: problem, value, ROI, and KPIs.",
            "Feasibility checks: technical, operational, legal/regulatory.",
            "Establish governance: decision rights, cadence, and change control entry/exit.",
        ],
    ),
    (
        "2. Project Planning",
        [
            "Decompose WBS with deliverables, acceptance criteria, and DoR/DoD.",
            "Build schedule baseline: sprints, milestones, critical path; estimate via story points/T-shirt sizes.",
            "Budget baseline: capex/opex, burn rate, contingency, and reserves.",
            "Risk planning: register (probability × impact), owners, response strategies.",
            "Quality planning: test strategy, Definition of Done, non-functional criteria.",
        ],
    ),
    (
        "3. Project Execution",
        [
            "Prioritize backlog; run sprint planning, daily standups, and pair programming.",
            "Implement CI with automated tests; code reviews and branch policies.",
            "Demo to stakeholders each sprint; capture feedback and feed to backlog.",
            "Manage vendors & environments; ensure observability and logging.",
            "Control changes via lightweight CCB; assess impact before approval.",
        ],
    ),
    (
        "4. Monitoring & Control",
        [
            "Track KPIs: velocity, burndown, lead time, escaped defects, uptime.",
            "Variance analysis on schedule/budget; forecast EAC/ETC where needed.",
            "Risk/issue control: update register, execute mitigations, escalate blockers.",
            "Quality control: test coverage, defect trend, performance SLAs.",
            "Stakeholder comms: status reports, RAID log, dependency board.",
        ],
    ),
    (
        "5. Project Closure",
        [
            "Formal acceptance & sign-off; verify scope completion against criteria.",
            "Operational handover: runbooks, SOPs, support SLAs, knowledge base.",
            "Retrospective & lessons learned; archive artifacts and code.",
            "Release resources, communicate closure, celebrate wins.",
            "Post-implementation review (30/60/90-day benefits tracking).",
        ],
    ),
];

/// Build the phase sections
pub fn phase_sections() -> Vec<PlanSection> {
    PHASES
        .iter()
        .map(|(title, bullets)| PlanSection {
            title: title.to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
        })
        .collect()
}

/// Assemble a plan from a form snapshot.
///
/// The timeline is derived here, from the same snapshot, so the chart always
/// matches the overview it is shown with.
pub fn assemble(form: &FormState) -> PlanDocument {
    PlanDocument {
        overview: form.clone(),
        sections: phase_sections(),
        timeline: timeline::derive_from_text(&form.timeline_weeks),
    }
}
