//! Namespaces commonly used in OSLC resource shapes.

use oslc_query::PrefixTable;

/// Well-known namespace IRIs.
pub mod well_known {
    /// RDF syntax
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// RDF schema
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// XML schema datatypes
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// Dublin Core terms
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";

    /// Friend of a friend
    pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";

    /// OSLC core
    pub const OSLC: &str = "http://open-services.net/ns/core#";

    /// OSLC requirements management
    pub const OSLC_RM: &str = "http://open-services.net/ns/rm#";

    /// OSLC change management
    pub const OSLC_CM: &str = "http://open-services.net/ns/cm#";

    /// OSLC quality management
    pub const OSLC_QM: &str = "http://open-services.net/ns/qm#";

    /// `(prefix, namespace)` pairs for every constant above.
    pub const ALL: &[(&str, &str)] = &[
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("xsd", XSD),
        ("dcterms", DCTERMS),
        ("foaf", FOAF),
        ("oslc", OSLC),
        ("oslc_rm", OSLC_RM),
        ("oslc_cm", OSLC_CM),
        ("oslc_qm", OSLC_QM),
    ];
}

/// A prefix table holding all [`well_known`] namespaces.
pub fn well_known_prefixes() -> PrefixTable {
    well_known::ALL.iter().copied().collect()
}
