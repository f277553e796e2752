//! Staff-only guard. Must run after the auth middleware.

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.identity_or_401() {
        Ok(identity) if identity.is_staff => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_) => {
            res.render(ApiError::forbidden());
            ctrl.skip_rest();
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}
