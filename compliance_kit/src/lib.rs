//! # Compliance Kit
//!
//! Finding-extraction and control-mapping engine for container scan output.
//! Consumes Trivy JSON scan results and produces MITRE SAF HDF compliance
//! profiles mapped to a NIST 800-53 Rev5 control catalog.
//!
//! ## Modules
//!
//! - `trivy` - Source record shapes for Trivy scan documents
//! - `corpus` - Loading and merging scan documents into one corpus
//! - `severity` - Severity ordering and impact scoring
//! - `finding` - The normalized finding model
//! - `normalize` - Corpus-to-findings extraction with explicit defaults
//! - `catalog` - The static control catalog (NIST 800-53 subset)
//! - `mapper` - Projection of findings onto catalog controls
//! - `profile` - HDF profile document types and the append-only assembler
//! - `pipeline` - High-level mapping API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use compliance_kit::catalog::ControlCatalog;
//! use compliance_kit::corpus::load_corpus;
//! use compliance_kit::pipeline::run_mapping;
//! use compliance_kit::profile::ProfileDocument;
//!
//! let corpus = load_corpus(&scan_files)?;
//! let catalog = ControlCatalog::nist_800_53();
//! let outcome = run_mapping(&corpus, &catalog);
//!
//! let mut doc = ProfileDocument::minimal("Trivy Container Scan", "Automated scan");
//! doc.append_evidence(&outcome.evidence, chrono::Utc::now());
//! ```

pub mod catalog;
pub mod corpus;
pub mod finding;
pub mod mapper;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod severity;
pub mod trivy;
