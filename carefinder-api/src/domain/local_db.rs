//! Static local provider database, the merge-fallback for every search
//! branch when scraped data is thin or absent.

use super::{ProviderRecord, RecordSource};

pub struct LocalDatabase {
    clinics: Vec<ProviderRecord>,
    insurers: Vec<ProviderRecord>,
}

struct ClinicSeed {
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    website: &'static str,
    specialties: &'static [&'static str],
    accepted_insurance: &'static [&'static str],
}

struct InsurerSeed {
    name: &'static str,
    phone: &'static str,
    website: &'static str,
    coverage_types: &'static [&'static str],
}

const CLINICS: &[ClinicSeed] = &[
    ClinicSeed {
        name: "HealthCare Plus",
        address: "123 Health Ave, Miami, FL",
        phone: "305-555-1234",
        website: "https://healthcareplusmiami.com",
        specialties: &["General Practice", "Pediatrics"],
        accepted_insurance: &["Aetna", "Blue Cross", "Cigna"],
    },
    ClinicSeed {
        name: "Miami Cardiology Associates",
        address: "450 Brickell Bay Dr, Miami, FL",
        phone: "305-555-2200",
        website: "https://miamicardiology.com",
        specialties: &["Cardiology"],
        accepted_insurance: &["Aetna", "UnitedHealthcare"],
    },
    ClinicSeed {
        name: "Coral Gables Dermatology Center",
        address: "88 Miracle Mile, Coral Gables, FL",
        phone: "305-555-3300",
        website: "https://coralgablesderm.com",
        specialties: &["Dermatology"],
        accepted_insurance: &["Cigna", "Florida Blue"],
    },
    ClinicSeed {
        name: "Sunset Family Practice",
        address: "7200 Sunset Dr, Miami, FL",
        phone: "305-555-4400",
        website: "https://sunsetfamilypractice.com",
        specialties: &["General Practice", "Internal Medicine"],
        accepted_insurance: &["Humana", "Medicare"],
    },
];

const INSURERS: &[InsurerSeed] = &[
    InsurerSeed {
        name: "Florida Health Insurance",
        phone: "1-800-555-0123",
        website: "https://floridahealthinsurance.com",
        coverage_types: &["Individual", "Family", "Medicare"],
    },
    InsurerSeed {
        name: "Aetna Better Health of Florida",
        phone: "1-800-441-5501",
        website: "https://aetnabetterhealth.com/florida",
        coverage_types: &["Individual", "Medicaid"],
    },
    InsurerSeed {
        name: "Cigna Health Florida",
        phone: "1-800-997-1654",
        website: "https://cigna.com",
        coverage_types: &["Individual", "Family", "Dental"],
    },
];

impl LocalDatabase {
    pub fn new() -> Self {
        let clinics = CLINICS
            .iter()
            .map(|seed| {
                let mut record = ProviderRecord::new(
                    seed.name,
                    seed.address,
                    seed.phone,
                    seed.website,
                    RecordSource::LocalDatabase,
                );
                record.specialties = seed.specialties.iter().map(|s| s.to_string()).collect();
                record.accepted_insurance =
                    seed.accepted_insurance.iter().map(|s| s.to_string()).collect();
                record
            })
            .collect();

        let insurers = INSURERS
            .iter()
            .map(|seed| {
                let mut record = ProviderRecord::new(
                    seed.name,
                    "Florida",
                    seed.phone,
                    seed.website,
                    RecordSource::LocalDatabase,
                );
                record.coverage_types =
                    seed.coverage_types.iter().map(|s| s.to_string()).collect();
                record
            })
            .collect();

        Self { clinics, insurers }
    }

    pub fn clinics(&self) -> &[ProviderRecord] {
        &self.clinics
    }

    pub fn insurers(&self) -> &[ProviderRecord] {
        &self.insurers
    }
}

impl Default for LocalDatabase {
    fn default() -> Self {
        Self::new()
    }
}
