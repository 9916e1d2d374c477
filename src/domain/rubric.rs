//! C1 Advanced writing rubric and band descriptor lookup.
//!
//! Each subscale defines descriptors for bands 5, 3 and 1 (Content also
//! defines band 0). Bands 2 and 4 are reported as sitting between their
//! neighbours; any other missing band falls back to "below Band 1".

use super::scores::{Band, Subscale};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub band: u8,
    pub summary: &'static str,
    pub details: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SubscaleDefinition {
    pub subscale: Subscale,
    pub description: &'static str,
    pub descriptors: &'static [Descriptor],
}

impl SubscaleDefinition {
    pub fn name(&self) -> String {
        self.subscale.to_string()
    }

    pub fn descriptor(&self, band: Band) -> &'static Descriptor {
        resolve(self, band)
    }
}

const BETWEEN_THREE_AND_FIVE: Descriptor = Descriptor {
    band: 4,
    summary: "Performance shares features of Bands 3 and 5.",
    details: &["Candidate demonstrates performance between Band 3 and Band 5."],
};

const BETWEEN_ONE_AND_THREE: Descriptor = Descriptor {
    band: 2,
    summary: "Performance shares features of Bands 1 and 3.",
    details: &["Candidate demonstrates performance between Band 1 and Band 3."],
};

const BELOW_ONE: Descriptor = Descriptor {
    band: 0,
    summary: "Performance below Band 1.",
    details: &[],
};

/// Descriptor to display for `band`.
pub fn resolve(definition: &SubscaleDefinition, band: Band) -> &'static Descriptor {
    if let Some(exact) = definition
        .descriptors
        .iter()
        .find(|d| d.band == band.value())
    {
        return exact;
    }
    match band.value() {
        4 => &BETWEEN_THREE_AND_FIVE,
        2 => &BETWEEN_ONE_AND_THREE,
        _ => &BELOW_ONE,
    }
}

pub fn definition(subscale: Subscale) -> &'static SubscaleDefinition {
    match subscale {
        Subscale::Content => &SCALES[0],
        Subscale::Communicative => &SCALES[1],
        Subscale::Organisation => &SCALES[2],
        Subscale::Language => &SCALES[3],
    }
}

pub static SCALES: [SubscaleDefinition; 4] = [
    SubscaleDefinition {
        subscale: Subscale::Content,
        description: "Focuses on how well the candidate has fulfilled the task, in other words if they have done what they were asked to do.",
        descriptors: &[
            Descriptor {
                band: 5,
                summary: "Target reader is fully informed.",
                details: &[
                    "All content is relevant to the task.",
                    "Target reader is fully informed.",
                ],
            },
            Descriptor {
                band: 3,
                summary: "Target reader is on the whole informed.",
                details: &[
                    "Minor irrelevances and/or omissions may be present.",
                    "Target reader is on the whole informed.",
                ],
            },
            Descriptor {
                band: 1,
                summary: "Target reader is minimally informed.",
                details: &[
                    "Irrelevances and misinterpretation of task may be present.",
                    "Target reader is minimally informed.",
                ],
            },
            Descriptor {
                band: 0,
                summary: "Target reader is not informed.",
                details: &[
                    "Content is totally irrelevant.",
                    "Target reader is not informed.",
                ],
            },
        ],
    },
    SubscaleDefinition {
        subscale: Subscale::Communicative,
        description: "Focuses on how appropriate the writing is for the task and whether the candidate has used the appropriate register.",
        descriptors: &[
            Descriptor {
                band: 5,
                summary: "Communicates complex ideas effectively.",
                details: &[
                    "Uses the conventions of the communicative task with sufficient flexibility to communicate complex ideas in an effective way.",
                    "Holds the target reader\u{2019}s attention with ease, fulfilling all communicative purposes.",
                ],
            },
            Descriptor {
                band: 3,
                summary: "Communicates straightforward and complex ideas.",
                details: &[
                    "Uses the conventions of the communicative task effectively to hold the target reader\u{2019}s attention.",
                    "Communicates straightforward and complex ideas, as appropriate.",
                ],
            },
            Descriptor {
                band: 1,
                summary: "Communicates straightforward ideas.",
                details: &[
                    "Uses the conventions of the communicative task to hold the target reader\u{2019}s attention.",
                    "Communicates straightforward ideas.",
                ],
            },
        ],
    },
    SubscaleDefinition {
        subscale: Subscale::Organisation,
        description: "Focuses on the way the candidate puts together the piece of writing, in other words if it is logical and ordered.",
        descriptors: &[
            Descriptor {
                band: 5,
                summary: "Well-organised, coherent whole.",
                details: &[
                    "Text is a well-organised, coherent whole.",
                    "Uses a variety of cohesive devices and organisational patterns with flexibility.",
                ],
            },
            Descriptor {
                band: 3,
                summary: "Well organised and coherent.",
                details: &[
                    "Text is well organised and coherent.",
                    "Using a variety of cohesive devices and organisational patterns to generally good effect.",
                ],
            },
            Descriptor {
                band: 1,
                summary: "Generally well organised.",
                details: &[
                    "Text is generally well organised and coherent.",
                    "Using a variety of linking words and cohesive devices.",
                ],
            },
        ],
    },
    SubscaleDefinition {
        subscale: Subscale::Language,
        description: "Focuses on vocabulary and grammar. This includes the range of language as well as how accurate it is.",
        descriptors: &[
            Descriptor {
                band: 5,
                summary: "Wide range, full control, occasional slips.",
                details: &[
                    "Uses a range of vocabulary, including less common lexis, effectively and precisely.",
                    "Uses a wide range of simple and complex grammatical forms with full control, flexibility and sophistication.",
                    "Errors, if present, are related to less common words and structures, or occur as slips.",
                ],
            },
            Descriptor {
                band: 3,
                summary: "Range of vocabulary, occasional errors.",
                details: &[
                    "Uses a range of vocabulary, including less common lexis, appropriately.",
                    "Uses a range of simple and complex grammatical forms with control and flexibility.",
                    "Occasional errors may be present but do not impede communication.",
                ],
            },
            Descriptor {
                band: 1,
                summary: "Everyday vocabulary, some errors.",
                details: &[
                    "Uses a range of everyday vocabulary appropriately, with occasional inappropriate use of less common lexis.",
                    "Uses a range of simple and some complex grammatical forms with a good degree of control.",
                    "Errors do not impede communication.",
                ],
            },
        ],
    },
];
