use flex_error::define_error;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        InvalidProof
            { reason: String }
            | e | { format_args!("invalid proof: {}", e.reason) },

        InvalidPrefix
            { reason: String }
            | e | { format_args!("invalid commitment prefix: {}", e.reason) },

        EmptyCommitmentPrefix
            | _ | { "empty commitment prefix" },

        EmptyCommitmentRoot
            | _ | { "empty commitment root" },

        ProofPathMismatch
            {
                proofs: usize,
                keys: usize,
            }
            | e | {
                format_args!("proof has {0} steps but the path has {1} keys",
                    e.proofs, e.keys)
            },

        NumberOfSpecsMismatch
            {
                proofs: usize,
                specs: usize,
            }
            | e | {
                format_args!("proof has {0} steps but {1} proof specs apply",
                    e.proofs, e.specs)
            },

        VerificationFailure
            { key: String }
            | e | { format_args!("proof does not verify for key {}", e.key) },

        RootMismatch
            | _ | { "calculated root does not match the commitment root" },
    }
}
