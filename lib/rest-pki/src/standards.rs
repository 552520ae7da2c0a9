//! Identifiers of the signature policies and security contexts the
//! service ships out of the box. Custom policies and contexts created on
//! the management panel are referenced by their own ids the same way.

use uuid::{Uuid, uuid};

pub struct StandardSignaturePolicies;

impl StandardSignaturePolicies {
    pub const PADES_BASIC: Uuid = uuid!("78d20b33-014d-440e-ad07-929f05d00cdf");
    pub const CADES_BES: Uuid = uuid!("a4522485-c9e5-46c3-950b-0d6e951e17d1");

    // ICP-Brasil CAdES policies (AD-RB, AD-RT, AD-RV, AD-RC)
    pub const PKI_BRAZIL_CADES_ADR_BASICA: Uuid = uuid!("3ddd8001-1672-4eb5-a4a2-6e32b17ddc46");
    pub const PKI_BRAZIL_CADES_ADR_TEMPO: Uuid = uuid!("a5332ad1-d105-447c-a4bb-b5d02177e439");
    pub const PKI_BRAZIL_CADES_ADR_VALIDACAO: Uuid = uuid!("92378630-dddf-45eb-8296-8fee0b73d5bb");
    pub const PKI_BRAZIL_CADES_ADR_COMPLETA: Uuid = uuid!("30d881e7-924a-4a14-b5cc-d5a1717d92f6");

    pub const XADES_BES: Uuid = uuid!("1beba282-d1b6-4458-8e46-bd8ad6800b54");
    pub const XML_DSIG_BASIC: Uuid = uuid!("2bb5d8c9-49ba-4c62-8104-8141f6459d08");
    pub const PKI_BRAZIL_XADES_ADR_BASICA: Uuid = uuid!("1cf5db62-58b6-40ba-88a3-d41bada9b621");
    pub const PKI_BRAZIL_XADES_ADR_TEMPO: Uuid = uuid!("5aa2e0af-5269-43b0-8d45-f4ef52921f04");
    pub const PKI_BRAZIL_NFE_PADRAO_NACIONAL: Uuid =
        uuid!("a3c24251-d43a-4ba4-b25d-ee8e2ab24f06");
}

pub struct StandardSecurityContexts;

impl StandardSecurityContexts {
    pub const PKI_BRAZIL: Uuid = uuid!("201856ce-273c-4058-a872-8937bd547d36");
    pub const PKI_ITALY: Uuid = uuid!("c438b17e-4862-446b-86ad-6f85734f0bfe");
    pub const WINDOWS_SERVER: Uuid = uuid!("3881384c-a54d-45c5-bbe9-976b674f5ec7");

    /// Accepts the Lacuna Test PKI certificates. Development only.
    pub const LACUNA_TEST: Uuid = uuid!("803517ad-3bbc-4169-b085-60053a8f6dbf");
}
