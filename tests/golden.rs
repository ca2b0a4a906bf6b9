use ethers::types::{Address, Bytes, Signature, H256, U256};
use paymaster_signer::encoding::{paymaster_hash, to_eth_signed_message_hash};
use paymaster_signer::{
    paymaster_sign, PaymasterError, PaymasterSigner, PrivateKeySigner, SigningError,
    SponsorshipContext, UserOperation,
};

const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

fn minimal_op() -> UserOperation {
    UserOperation {
        sender: "0x0000000000000000000000000000000000000001".parse().unwrap(),
        nonce: U256::zero(),
        init_code: Bytes::default(),
        call_data: Bytes::default(),
        call_gas_limit: U256::zero(),
        verification_gas_limit: U256::zero(),
        pre_verification_gas: U256::zero(),
        max_fee_per_gas: U256::zero(),
        max_priority_fee_per_gas: U256::zero(),
        paymaster_and_data: Bytes::default(),
        signature: Bytes::default(),
    }
}

fn minimal_ctx() -> SponsorshipContext {
    SponsorshipContext::new(
        "0x0000000000000000000000000000000000000002".parse().unwrap(),
        U256::one(),
        0,
        0,
    )
}

fn h256(hex: &str) -> H256 {
    hex.parse().unwrap()
}

#[test]
fn minimal_operation_golden_vector() {
    let signer: PrivateKeySigner = TEST_KEY.parse().unwrap();
    let op = minimal_op();
    let ctx = minimal_ctx();

    let inner = paymaster_hash(&op, &ctx).unwrap();
    assert_eq!(inner, h256("0x78753ac69bbd02820ae4326d434a6fdfb9d69be1fc28a134a72212631cce1341"));

    let outer = to_eth_signed_message_hash(inner);
    assert_eq!(outer, h256("0x8ff41c151efa57383ad943f727400d1b1ed83090c52918020fb268c20443274a"));

    let signature = paymaster_sign(&op, &ctx, &signer).unwrap();
    assert_eq!(
        hex::encode(&signature),
        "ac450e4e8d11dc9a380e1c183ddc9dec031c58129effb3adb1d2bcc6cbbff171\
         3fa9601ae672eceea3e5b2c3c7cb5f2b78495fc194f79f99a90320a9808933a91c"
    );
}

#[test]
fn populated_operation_golden_vector() {
    let signer: PrivateKeySigner = TEST_KEY.parse().unwrap();
    let op = UserOperation {
        sender: "0x1306b01bc3e4ad202612d3843387e94737673f53".parse().unwrap(),
        nonce: U256::from(8942),
        init_code: "0x6942069420694206942069420694206942069420".parse().unwrap(),
        call_data: "0x0000000000000000000000000000000000000000080085".parse().unwrap(),
        call_gas_limit: U256::from(10_000),
        verification_gas_limit: U256::from(100_000),
        pre_verification_gas: U256::from(100),
        max_fee_per_gas: U256::from(99_999),
        max_priority_fee_per_gas: U256::from(9_999_999),
        paymaster_and_data: Bytes::default(),
        signature: Bytes::default(),
    };
    let ctx = SponsorshipContext::new(
        signer.address(),
        U256::from(1337),
        1_700_003_600,
        1_700_000_000,
    );

    let inner = op.paymaster_hash(&ctx).unwrap();
    assert_eq!(inner, h256("0x99a279048fe13916a0bf31055d5b0bf9c2c15ffc70abe47c29bc5a5e0d8d9a35"));
    assert_eq!(
        to_eth_signed_message_hash(inner),
        h256("0xbc0e5a94822e77a47e4b4fab102852197b020a523ca54516dee2e8f8752c9816")
    );

    let signature = op.paymaster_sign(&ctx, &signer).unwrap();
    assert_eq!(
        hex::encode(&signature),
        "fa5f4329c9e9e30d3a281086b5ec5b6f04dc5bdad500b5bd7f4ea8cc94f55427\
         6550da9d830e045a8c95a2175b5a01a9c2627bd11094a8d17e6da2c9ff08f57e1b"
    );

    let recovered = Signature::try_from(signature.as_slice())
        .unwrap()
        .recover(to_eth_signed_message_hash(inner))
        .unwrap();
    assert_eq!(recovered, signer.address());
}

#[test]
fn short_digest_is_rejected_not_padded() {
    let signer: PrivateKeySigner = TEST_KEY.parse().unwrap();
    let digest = [0x5au8; 31];
    assert_eq!(signer.sign_hash(&digest), Err(SigningError::InvalidDigestLength(31)));
}

#[test]
fn out_of_range_validity_produces_no_signature() {
    let signer: PrivateKeySigner = TEST_KEY.parse().unwrap();
    let mut ctx = minimal_ctx();
    ctx.valid_after = U256::one() << 48;

    let result = paymaster_sign(&minimal_op(), &ctx, &signer);
    assert!(matches!(result, Err(PaymasterError::Encoding(_))));
}

#[test]
fn shared_signer_is_usable_across_threads() {
    let signer = std::sync::Arc::new(TEST_KEY.parse::<PrivateKeySigner>().unwrap());
    let expected = paymaster_sign(&minimal_op(), &minimal_ctx(), &signer).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let signer = signer.clone();
            std::thread::spawn(move || {
                paymaster_sign(&minimal_op(), &minimal_ctx(), &signer).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_ne!(signer.address(), Address::zero());
}
