#[test]
fn convert() {
    trycmd::TestCases::new()
        .case("tests/convert/*.toml")
        .env("MSMC2SFS_ALLOW_STDIN", "true")
        .default_bin_name("msmc2sfs");
}
