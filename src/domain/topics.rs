/// Topic pool for generated tasks.
pub const TOPICS: [&str; 15] = [
    "Urban Traffic and Transport Policies",
    "Funding for Local Facilities (Sports vs Arts)",
    "School Curriculum Changes",
    "Work-Life Balance and Remote Working",
    "Environmental Responsibility in Towns",
    "Youth Unemployment Solutions",
    "Preserving Local History vs Modernisation",
    "The Role of Museums and Libraries",
    "Healthy Eating Initiatives",
    "University Funding and Tuition",
    "Public Transport Improvements",
    "Supporting Local Businesses",
    "Technology in Classrooms",
    "Sports Facilities in Towns",
    "Charity and Community Service",
];
