//! Property tests for flag coercion, filename validation and listing merge.

use deltaco_core::{
    parse_downloadable, AppendRequest, Catalog, CatalogListing, ModEntry, UploadFilename,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn only_exact_true_is_downloadable(flag in ".*") {
        prop_assert_eq!(parse_downloadable(Some(flag.as_str())), flag == "true");
    }

    #[test]
    fn generated_filenames_always_parse(original in ".{0,40}") {
        let generated = UploadFilename::generate(Some(original.as_str()));
        prop_assert!(UploadFilename::parse(generated.as_str()).is_ok());
    }

    #[test]
    fn names_with_separators_never_parse(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}", sep in prop::sample::select(vec!["/", "\\", ".."])) {
        let name = format!("{prefix}{sep}{suffix}");
        prop_assert!(UploadFilename::parse(&name).is_err());
    }

    #[test]
    fn listing_has_one_row_per_file(
        files in prop::collection::btree_set("[a-z]{1,8}\\.pbo", 0..12),
        records in prop::collection::vec("[a-z]{1,8}\\.pbo", 0..12),
    ) {
        let mut catalog = Catalog::new();
        for filename in &records {
            catalog.push(AppendRequest::Mod(ModEntry {
                name: "n".into(),
                description: "d".into(),
                version: "v".into(),
                category: "c".into(),
                filename: filename.clone(),
                downloadable: true,
            }));
        }
        let listing = CatalogListing::reconcile(files.iter(), catalog, "/mods");
        prop_assert_eq!(listing.mods.len(), files.len());
        for row in &listing.mods {
            let file = row.url.trim_start_matches("/mods/");
            prop_assert!(files.contains(file));
            prop_assert_eq!(row.downloadable, records.iter().any(|r| r == file));
        }
    }
}
