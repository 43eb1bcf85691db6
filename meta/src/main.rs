fn main() {
    multiversx_sc_meta_lib::cli_main::<reputation_fund::AbiProvider>();
}
