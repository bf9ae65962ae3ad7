//! Fixed option lists offered by the application form.

/// Leadership roles offered as checkboxes in the first step.
pub const LEADERSHIP_OPTIONS: &[&str] = &[
    "Current/Previous Sub-Warden",
    "House Committee Member",
    "Residence Mentor",
    "Floor Representative",
    "Student Governance",
    "Student Council",
    "Faculty Council",
    "UCT Leadership Role",
    "Student Societies Executive",
    "Sports Team Captain/Manager",
    "Tutor/Teaching Assistant",
    "Student Volunteer Program",
    "Peer Mentor Program",
];

/// Positions currently open for application.
pub const OPEN_POSITIONS: &[&str] = &["Roscommon Sub-Warden 2026"];

pub fn is_listed_role(label: &str) -> bool {
    LEADERSHIP_OPTIONS.contains(&label)
}
