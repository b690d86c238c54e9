mod test_hot_seat_game;
mod test_move_reaches_peer;
mod test_out_of_turn_move_not_sent;
